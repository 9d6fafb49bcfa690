//! Binding store: maps `(input code, modifier combination)` to the bound action.
//!
//! The store is the single source of truth for bindings. Each slot resolves to
//! at most one action, while one action may own any number of slots (several
//! inputs, several combinations).

use crate::models::{BindingEntry, BindingKey, DeviceType, Modifier, ModifierCombination};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Mapping from composite key to binding entry for one keybind set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingStore {
    entries: HashMap<BindingKey, BindingEntry>,
}

impl BindingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from entries; later entries win on key collisions.
    pub fn from_entries(entries: impl IntoIterator<Item = BindingEntry>) -> Self {
        Self {
            entries: entries.into_iter().map(|e| (e.key(), e)).collect(),
        }
    }

    /// Binds `input_code` under `modifiers` to `action_id`.
    ///
    /// Any entry already occupying that slot is evicted. Entries of the same
    /// action under other inputs or other combinations are left alone.
    ///
    /// Returns every entry now bound to `action_id`, sorted by key, so callers
    /// can refresh the action's `key_mappings`.
    pub fn bind(
        &mut self,
        input_code: &str,
        device_type: DeviceType,
        display_name: &str,
        modifiers: ModifierCombination,
        action_id: &str,
    ) -> Vec<BindingEntry> {
        let entry = BindingEntry::new(input_code, device_type, display_name, modifiers, action_id);
        if let Some(evicted) = self.entries.insert(entry.key(), entry) {
            if evicted.action_id != action_id {
                debug!(
                    "Evicted binding {}:{} from action {}",
                    evicted.input_code, evicted.modifier_combination, evicted.action_id
                );
            }
        }
        self.entries_for_action(action_id)
    }

    /// Removes the entry at `(input_code, modifiers)`.
    ///
    /// Returns the id of the action that lost the binding, or `None` if the
    /// slot was empty.
    pub fn unbind(&mut self, input_code: &str, modifiers: ModifierCombination) -> Option<String> {
        self.entries
            .remove(&BindingKey::new(input_code, modifiers))
            .map(|entry| entry.action_id)
    }

    /// Removes every entry bound to `action_id`, across all inputs and
    /// combinations. Returns how many entries were removed.
    pub fn unbind_action(&mut self, action_id: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.action_id != action_id);
        before - self.entries.len()
    }

    /// Entry bound at `(input_code, modifiers)`, if any.
    pub fn lookup(&self, input_code: &str, modifiers: ModifierCombination) -> Option<&BindingEntry> {
        self.entries.get(&BindingKey::new(input_code, modifiers))
    }

    /// Whether either physical key of `modifier` is bound under any
    /// combination.
    pub fn is_modifier_key_bound(&self, modifier: Modifier) -> bool {
        let codes = modifier.key_codes();
        self.entries
            .keys()
            .any(|key| codes.contains(&key.input_code.as_str()))
    }

    /// All entries bound to `action_id`, sorted by key.
    pub fn entries_for_action(&self, action_id: &str) -> Vec<BindingEntry> {
        let mut entries: Vec<BindingEntry> = self
            .entries
            .values()
            .filter(|entry| entry.action_id == action_id)
            .cloned()
            .collect();
        entries.sort_by_key(BindingEntry::key);
        entries
    }

    /// All entries, sorted by key.
    pub fn entries(&self) -> Vec<&BindingEntry> {
        let mut entries: Vec<&BindingEntry> = self.entries.values().collect();
        entries.sort_by_key(|entry| entry.key());
        entries
    }

    /// Keeps only entries whose action satisfies `keep`; returns the removed ones.
    pub fn retain_actions(&mut self, keep: impl Fn(&str) -> bool) -> Vec<BindingEntry> {
        let orphaned: Vec<BindingKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| !keep(entry.action_id.as_str()))
            .map(|(key, _)| key.clone())
            .collect();

        orphaned
            .into_iter()
            .filter_map(|key| self.entries.remove(&key))
            .collect()
    }

    /// Number of bound slots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stored as `[["<inputCode>:<tag>", entry], ...]`, sorted by key.
impl Serialize for BindingStore {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<(String, &BindingEntry)> = self
            .entries()
            .into_iter()
            .map(|entry| (entry.key().to_string(), entry))
            .collect();
        pairs.serialize(serializer)
    }
}

/// The entry's own fields are authoritative; the string key is only checked.
impl<'de> Deserialize<'de> for BindingStore {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs: Vec<(String, BindingEntry)> = Vec::deserialize(deserializer)?;
        let entries = pairs.into_iter().map(|(stored_key, entry)| {
            let key = entry.key().to_string();
            if stored_key != key {
                warn!("Binding stored under '{stored_key}' describes '{key}', using '{key}'");
            }
            entry
        });
        Ok(Self::from_entries(entries))
    }
}
