//! Keybind sets and the registry that selects among them.
//!
//! A set bundles one namespace of actions, color groups, and bindings. Sets
//! live here rather than in `models` because a set owns a [`BindingStore`].

use crate::models::{Action, ColorGroup};
use crate::services::BindingStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// A named namespace bundling its own actions, bindings, and color groups.
///
/// Switching the active set swaps all three at once; sets never share or
/// merge content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeybindSet {
    /// Unique identifier
    pub id: String,
    /// Display name (e.g. "Default", "Shooter")
    pub name: String,
    /// Creation timestamp (ISO 8601)
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp (ISO 8601)
    pub last_modified: DateTime<Utc>,
    /// Color groups, in display order
    #[serde(default)]
    pub color_groups: Vec<ColorGroup>,
    /// Actions, in display order
    #[serde(default)]
    pub actions: Vec<Action>,
    /// Every binding of this set
    #[serde(default)]
    pub bindings: BindingStore,
}

impl KeybindSet {
    /// Creates an empty set holding only the default color group.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now,
            last_modified: now,
            color_groups: vec![ColorGroup::default_group()],
            actions: Vec::new(),
            bindings: BindingStore::new(),
        }
    }

    /// Updates the modification timestamp to now.
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    /// Updates the set name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    /// Rebuilds every action's `key_mappings` from the binding store and drops
    /// bindings whose action no longer exists.
    ///
    /// Returns the number of orphaned bindings removed.
    pub fn normalize(&mut self) -> usize {
        let orphans = self
            .bindings
            .retain_actions(|id| self.actions.iter().any(|a| a.id == id));

        for action in &mut self.actions {
            action.set_key_mappings(self.bindings.entries_for_action(&action.id));
        }

        orphans.len()
    }
}

impl Default for KeybindSet {
    fn default() -> Self {
        Self::new("Default")
    }
}

/// Owns every keybind set and tracks which one is active.
///
/// Outside of construction the registry always holds at least one set and
/// a valid selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeybindSetRegistry {
    sets: Vec<KeybindSet>,
    selected_id: Option<String>,
}

impl Default for KeybindSetRegistry {
    fn default() -> Self {
        Self::from_parts(Vec::new(), None)
    }
}

impl KeybindSetRegistry {
    /// Builds a registry from loaded sets and repairs it: an empty registry
    /// gets a default set, and a missing or stale selection falls back to
    /// the first set.
    pub fn from_parts(sets: Vec<KeybindSet>, selected_id: Option<String>) -> Self {
        let mut registry = Self { sets, selected_id };
        registry.ensure_default();
        registry
    }

    /// Repairs the registry invariants. Returns `true` if anything changed.
    pub fn ensure_default(&mut self) -> bool {
        let mut changed = false;

        if self.sets.is_empty() {
            let set = KeybindSet::default();
            info!("Created default keybind set ({})", set.id);
            self.sets.push(set);
            changed = true;
        }

        let selection_valid = self
            .selected_id
            .as_deref()
            .is_some_and(|id| self.get(id).is_some());
        if !selection_valid {
            self.selected_id = self.sets.first().map(|s| s.id.clone());
            changed = true;
        }

        changed
    }

    /// All sets in creation order.
    pub fn sets(&self) -> &[KeybindSet] {
        &self.sets
    }

    /// Looks up a set by id.
    pub fn get(&self, id: &str) -> Option<&KeybindSet> {
        self.sets.iter().find(|s| s.id == id)
    }

    /// Id of the active set.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The active set.
    pub fn selected(&self) -> Option<&KeybindSet> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    /// Creates an empty set holding one default color group and selects it.
    pub fn create_set(&mut self, name: &str) -> KeybindSet {
        let set = KeybindSet::new(name);
        info!("Created keybind set '{}' ({})", set.name, set.id);
        self.selected_id = Some(set.id.clone());
        self.sets.push(set.clone());
        set
    }

    /// Renames a set. Returns `false` on an unknown id.
    pub fn rename_set(&mut self, id: &str, name: &str) -> bool {
        let Some(set) = self.sets.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        set.set_name(name);
        true
    }

    /// Deletes a set. The last remaining set cannot be deleted.
    ///
    /// Deleting the active set selects the first remaining one.
    pub fn delete_set(&mut self, id: &str) -> bool {
        if self.sets.len() <= 1 {
            debug!("Refusing to delete the last keybind set");
            return false;
        }
        let Some(index) = self.sets.iter().position(|s| s.id == id) else {
            return false;
        };

        let removed = self.sets.remove(index);
        info!("Deleted keybind set '{}' ({})", removed.name, removed.id);

        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = self.sets.first().map(|s| s.id.clone());
        }
        true
    }

    /// Makes `id` the active set. Returns `false` on an unknown id.
    pub fn select_set(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            return false;
        }
        if self.selected_id.as_deref() != Some(id) {
            info!("Selected keybind set {id}");
            self.selected_id = Some(id.to_string());
        }
        true
    }

    /// Writes the active view back into the selected set's record and stamps
    /// `last_modified`.
    pub fn update_active_set(
        &mut self,
        actions: Vec<Action>,
        bindings: BindingStore,
        color_groups: Vec<ColorGroup>,
    ) -> bool {
        let Some(id) = self.selected_id.as_deref() else {
            return false;
        };
        let Some(set) = self.sets.iter_mut().find(|s| s.id == id) else {
            return false;
        };

        set.actions = actions;
        set.bindings = bindings;
        set.color_groups = color_groups;
        set.touch();
        true
    }
}
