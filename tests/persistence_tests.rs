//! File-backed persistence tests: reopen round trips, legacy import, and
//! recovery from unreadable data.

use kbm_layout::models::{ActionUpdate, DeviceType, ModifierCombination, RgbColor};
use kbm_layout::services::persistence::{DOCUMENT_KEY, CURRENT_VERSION};
use kbm_layout::services::{FileStore, KeyValueStore};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

fn document_path(dir: &std::path::Path) -> std::path::PathBuf {
    dir.join(format!("{DOCUMENT_KEY}.json"))
}

fn read_document(dir: &std::path::Path) -> Value {
    let content = fs::read_to_string(document_path(dir)).expect("document should exist");
    serde_json::from_str(&content).expect("document should be JSON")
}

#[test]
fn test_fresh_install_writes_default_set() {
    let (session, temp_dir) = temp_file_session();
    assert_eq!(session.keybind_sets().sets().len(), 1);

    let doc = read_document(temp_dir.path());
    assert_eq!(doc["schemaVersion"], CURRENT_VERSION);
    assert_eq!(doc["keybindSets"].as_array().unwrap().len(), 1);
    assert_eq!(doc["keybindSets"][0]["name"], "Default");
    assert_eq!(
        doc["selectedKeybindSetId"],
        doc["keybindSets"][0]["id"]
    );
}

#[test]
fn test_state_survives_reopen() {
    let (mut session, temp_dir) = temp_file_session();
    let group = session.add_color_group("Combat", RgbColor::new(0xFF, 0x44, 0x44));
    let ids = add_actions(&mut session, &["Jump", "Fire"]);
    session.update_action(&ids[1], ActionUpdate::color_group(group.id.clone()));
    bind_key(&mut session, "Space", ModifierCombination::None, &ids[0]);
    bind_key(&mut session, "KeyA", ModifierCombination::CtrlShift, &ids[1]);
    session.bind(
        "MouseLeft",
        DeviceType::Mouse,
        "Left Click",
        ModifierCombination::None,
        &ids[1],
    );

    let actions = session.actions().to_vec();
    let bindings = session.bindings().clone();
    let groups = session.color_groups().to_vec();
    drop(session);

    let reopened = open_file_session(temp_dir.path());
    assert_eq!(reopened.actions(), actions.as_slice());
    assert_eq!(*reopened.bindings(), bindings);
    assert_eq!(reopened.color_groups(), groups.as_slice());
    assert_projection_consistent(&reopened);

    let (fire, color) = reopened.action_for("MouseLeft").unwrap();
    assert_eq!(fire.id, ids[1]);
    assert_eq!(color, RgbColor::new(0xFF, 0x44, 0x44));
}

#[test]
fn test_selected_set_survives_reopen() {
    let (mut session, temp_dir) = temp_file_session();
    let ids = add_actions(&mut session, &["Jump"]);
    bind_key(&mut session, "Space", ModifierCombination::None, &ids[0]);

    let second = session.create_set("Racing");
    add_actions(&mut session, &["Accelerate"]);
    drop(session);

    let mut reopened = open_file_session(temp_dir.path());
    assert_eq!(reopened.keybind_sets().sets().len(), 2);
    assert_eq!(reopened.keybind_sets().selected_id(), Some(second.id.as_str()));
    assert_eq!(reopened.actions().len(), 1);
    assert_eq!(reopened.actions()[0].name, "Accelerate");
    assert!(reopened.bindings().is_empty());

    let first_id = reopened.keybind_sets().sets()[0].id.clone();
    assert!(reopened.select_set(&first_id));
    assert_eq!(reopened.actions()[0].name, "Jump");
    assert!(reopened.lookup("Space", ModifierCombination::None).is_some());
}

#[test]
fn test_corrupt_document_is_replaced_with_defaults() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(document_path(temp_dir.path()), "{ not json").unwrap();

    let session = open_file_session(temp_dir.path());
    assert_eq!(session.keybind_sets().sets().len(), 1);
    assert!(session.actions().is_empty());

    let doc = read_document(temp_dir.path());
    assert_eq!(doc["schemaVersion"], CURRENT_VERSION);
}

#[test]
fn test_legacy_flat_storage_is_imported() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path());
    store
        .set(
            "kbm_layout_actions",
            r#"[{"id":"a1","name":"Jump","colorGroupId":"g1"},
                {"id":"a2","name":"Crouch","colorGroupId":"g1"}]"#,
        )
        .unwrap();
    store
        .set(
            "kbm_layout_key_mappings",
            r#"[["Space",{"keyCode":"Space","deviceType":"keyboard","displayName":"Space","actionId":"a1"}],
                ["ControlLeft",{"keyCode":"ControlLeft","deviceType":"keyboard","displayName":"Ctrl","actionId":"a2"}]]"#,
        )
        .unwrap();
    store
        .set(
            "kbm_layout_color_groups",
            r##"[{"id":"g1","name":"Movement","color":"#44FF44"}]"##,
        )
        .unwrap();
    store.set("kbm_layout_storage_version", "2").unwrap();

    let session = open_file_session(temp_dir.path());
    let set = session.keybind_sets().selected().unwrap();
    assert_eq!(set.name, "Default");
    assert_eq!(session.actions().len(), 2);
    assert_eq!(session.color_groups()[0].name, "Movement");
    assert_eq!(
        session.lookup("Space", ModifierCombination::None).unwrap().action_id,
        "a1"
    );
    assert_eq!(
        session.lookup("ControlLeft", ModifierCombination::None).unwrap().action_id,
        "a2"
    );
    assert_projection_consistent(&session);

    // Migrated document was written back
    let doc = read_document(temp_dir.path());
    assert_eq!(doc["schemaVersion"], CURRENT_VERSION);
    assert_eq!(doc["keybindSets"][0]["actions"].as_array().unwrap().len(), 2);
}

#[test]
fn test_reset_removes_legacy_keys() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = FileStore::new(temp_dir.path());
    store
        .set(
            "kbm_layout_actions",
            r#"[{"id":"a1","name":"Jump","colorGroupId":"g1"}]"#,
        )
        .unwrap();

    let mut session = open_file_session(temp_dir.path());
    assert_eq!(session.actions().len(), 1);

    session.reset();
    assert!(session.actions().is_empty());
    assert!(!temp_dir.path().join("kbm_layout_actions.json").exists());
    drop(session);

    let reopened = open_file_session(temp_dir.path());
    assert!(reopened.actions().is_empty());
    assert_eq!(reopened.keybind_sets().sets().len(), 1);
}
