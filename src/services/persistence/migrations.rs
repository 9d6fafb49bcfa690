//! Schema migrations for the persisted document.
//!
//! Each step is a function from the JSON shape of one version to the next.
//! Steps run in ascending order and leave already-migrated data unchanged,
//! so replaying them is harmless.

use crate::models::{ModifierCombination, RgbColor};
use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::{debug, info};
use uuid::Uuid;

/// Schema version written by this build.
pub const CURRENT_VERSION: u32 = 3;

type Migration = fn(Value) -> Value;

/// `(source version, step)` pairs in ascending order.
const MIGRATIONS: [(u32, Migration); 2] = [
    (1, modifier_aware_bindings),
    (2, wrap_in_keybind_set),
];

/// Reads `schemaVersion`; documents without one predate versioning (v1).
pub fn document_version(doc: &Value) -> u32 {
    doc.get("schemaVersion")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .map_or(1, |v| v.max(1))
}

/// Applies every step from `from` up to [`CURRENT_VERSION`] and stamps the
/// result with the current version. Newer documents are returned untouched.
pub fn migrate(mut doc: Value, from: u32) -> Value {
    if from > CURRENT_VERSION {
        return doc;
    }

    for (version, step) in MIGRATIONS {
        if from <= version {
            debug!("Applying schema migration v{} -> v{}", version, version + 1);
            doc = step(doc);
        }
    }

    if let Some(obj) = doc.as_object_mut() {
        obj.insert("schemaVersion".to_string(), json!(CURRENT_VERSION));
    }
    if from < CURRENT_VERSION {
        info!("Migrated stored data from schema v{from} to v{CURRENT_VERSION}");
    }
    doc
}

/// v1 -> v2: bindings gain a modifier combination.
///
/// `keyCode` becomes `inputCode`, entries without a combination get
/// `"none"`, binding keys gain their `:<tag>` suffix, and an action's single
/// `keyMapping` becomes a one-element `keyMappings` list.
fn modifier_aware_bindings(mut doc: Value) -> Value {
    match doc.get_mut("keybindSets").and_then(Value::as_array_mut) {
        Some(sets) => {
            for set in sets.iter_mut().filter_map(Value::as_object_mut) {
                upgrade_scope(set);
            }
        }
        None => {
            if let Some(obj) = doc.as_object_mut() {
                upgrade_scope(obj);
            }
        }
    }
    doc
}

fn upgrade_scope(scope: &mut Map<String, Value>) {
    if let Some(bindings) = scope.get_mut("bindings").and_then(Value::as_array_mut) {
        for pair in bindings.iter_mut() {
            upgrade_binding_pair(pair);
        }
    }

    if let Some(actions) = scope.get_mut("actions").and_then(Value::as_array_mut) {
        for action in actions.iter_mut().filter_map(Value::as_object_mut) {
            upgrade_action(action);
        }
    }
}

fn upgrade_binding_pair(pair: &mut Value) {
    let Some([key, entry]) = pair.as_array_mut().map(Vec::as_mut_slice) else {
        return;
    };
    upgrade_entry(entry);

    let combination = entry
        .get("modifierCombination")
        .and_then(Value::as_str)
        .unwrap_or("none")
        .to_string();
    let suffixed = key
        .as_str()
        .filter(|stored| !has_combination_suffix(stored))
        .map(|stored| format!("{stored}:{combination}"));
    if let Some(suffixed) = suffixed {
        *key = Value::String(suffixed);
    }
}

fn has_combination_suffix(key: &str) -> bool {
    key.rsplit_once(':')
        .is_some_and(|(_, tag)| !tag.is_empty() && tag.parse::<ModifierCombination>().is_ok())
}

fn upgrade_entry(entry: &mut Value) {
    let Some(obj) = entry.as_object_mut() else {
        return;
    };
    if !obj.contains_key("inputCode") {
        if let Some(code) = obj.remove("keyCode") {
            obj.insert("inputCode".to_string(), code);
        }
    }
    obj.entry("modifierCombination")
        .or_insert_with(|| json!("none"));
}

/// Old per-action entries may omit `actionId`; it is filled from the owner.
fn upgrade_owned_entry(entry: &mut Value, owner: Option<&Value>) {
    upgrade_entry(entry);
    if let (Some(obj), Some(owner)) = (entry.as_object_mut(), owner) {
        obj.entry("actionId").or_insert_with(|| owner.clone());
    }
}

fn upgrade_action(action: &mut Map<String, Value>) {
    let owner = action.get("id").cloned();

    if let Some(Value::Array(mappings)) = action.get_mut("keyMappings") {
        for pair in mappings.iter_mut() {
            if let Some(entry) = pair.as_array_mut().and_then(|p| p.get_mut(1)) {
                upgrade_owned_entry(entry, owner.as_ref());
            }
        }
    }

    if let Some(mut single) = action.remove("keyMapping") {
        let has_mappings = action
            .get("keyMappings")
            .is_some_and(|m| m.as_array().is_some_and(|a| !a.is_empty()));
        if single.is_object() && !has_mappings {
            upgrade_owned_entry(&mut single, owner.as_ref());
            let tag = single
                .get("modifierCombination")
                .cloned()
                .unwrap_or_else(|| json!("none"));
            action.insert("keyMappings".to_string(), json!([[tag, single]]));
        }
    }
}

/// v2 -> v3: a flat single-namespace document becomes one keybind set named
/// "Default", which is selected.
fn wrap_in_keybind_set(doc: Value) -> Value {
    if doc.get("keybindSets").is_some() {
        return doc;
    }

    let mut flat = match doc {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let take_array = |map: &mut Map<String, Value>, key: &str| match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    };

    let actions = take_array(&mut flat, "actions");
    let bindings = take_array(&mut flat, "bindings");
    let mut color_groups = take_array(&mut flat, "colorGroups");
    if color_groups.is_empty() {
        color_groups.push(json!({
            "id": Uuid::new_v4().to_string(),
            "name": "Default",
            "color": RgbColor::DEFAULT_GROUP.to_hex(),
            "isDefault": true,
        }));
    }

    let id = Uuid::new_v4().to_string();
    let now = Utc::now().to_rfc3339();
    json!({
        "schemaVersion": 3,
        "keybindSets": [{
            "id": id,
            "name": "Default",
            "createdAt": now,
            "lastModified": now,
            "colorGroups": color_groups,
            "actions": actions,
            "bindings": bindings,
        }],
        "selectedKeybindSetId": id,
    })
}
