//! User-defined actions that inputs can be bound to.

use crate::models::{BindingEntry, BindingKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A user-named, color-tagged logical command.
///
/// `key_mappings` is a projection of the binding store: every entry bound to
/// this action, keyed the same way the store keys them. It is rebuilt from the
/// store after each mutation and never edited on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display name (not required to be unique)
    pub name: String,
    /// Referenced color group (may dangle after the group is deleted)
    pub color_group_id: String,
    /// Entries currently bound to this action
    #[serde(default, with = "key_mappings_serde")]
    pub key_mappings: BTreeMap<BindingKey, BindingEntry>,
}

impl Action {
    /// Creates an unmapped action with a fresh id.
    ///
    /// Any name is accepted and names need not be unique; callers that take
    /// names from users validate them first.
    ///
    /// # Examples
    ///
    /// ```
    /// use kbm_layout::models::Action;
    ///
    /// let action = Action::new("Jump", "g1");
    /// assert!(action.is_unmapped());
    /// ```
    pub fn new(name: impl Into<String>, color_group_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color_group_id: color_group_id.into(),
            key_mappings: BTreeMap::new(),
        }
    }

    /// An action with no bound inputs.
    #[must_use]
    pub fn is_unmapped(&self) -> bool {
        self.key_mappings.is_empty()
    }

    /// Replaces the projection with `entries` (all expected to reference this action).
    pub fn set_key_mappings(&mut self, entries: impl IntoIterator<Item = BindingEntry>) {
        self.key_mappings = entries.into_iter().map(|e| (e.key(), e)).collect();
    }

    /// Labels of every bound input, e.g. `["A", "Shift+A"]`.
    #[must_use]
    pub fn binding_labels(&self) -> Vec<String> {
        self.key_mappings
            .values()
            .map(BindingEntry::display_label)
            .collect()
    }
}

/// Partial update for [`Action`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionUpdate {
    /// New display name
    pub name: Option<String>,
    /// New color group reference
    pub color_group_id: Option<String>,
}

impl ActionUpdate {
    /// Update that only renames.
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Update that only moves the action to another color group.
    pub fn color_group(color_group_id: impl Into<String>) -> Self {
        Self {
            color_group_id: Some(color_group_id.into()),
            ..Self::default()
        }
    }
}

/// Stores key mappings as `[[modifierTag, entry], ...]`.
///
/// The tag alone cannot key the map (an action may own several inputs under
/// one combination), so the composite key is rebuilt from each entry.
mod key_mappings_serde {
    use crate::models::{BindingEntry, BindingKey, ModifierCombination};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S>(
        mappings: &BTreeMap<BindingKey, BindingEntry>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let pairs: Vec<(ModifierCombination, &BindingEntry)> = mappings
            .values()
            .map(|entry| (entry.modifier_combination, entry))
            .collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeMap<BindingKey, BindingEntry>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let pairs: Option<Vec<(ModifierCombination, BindingEntry)>> =
            Option::deserialize(deserializer)?;
        Ok(pairs
            .unwrap_or_default()
            .into_iter()
            .map(|(_, entry)| (entry.key(), entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeviceType, ModifierCombination};

    fn entry(code: &str, combo: ModifierCombination, action_id: &str) -> BindingEntry {
        BindingEntry::new(code, DeviceType::Keyboard, code, combo, action_id)
    }

    #[test]
    fn test_new_action_is_unmapped() {
        let action = Action::new("Jump", "g1");
        assert!(action.is_unmapped());
        assert_eq!(action.color_group_id, "g1");
        assert!(!action.id.is_empty());
    }

    #[test]
    fn test_new_keeps_name_as_given() {
        let long = "x".repeat(51);
        assert_eq!(Action::new(long.as_str(), "g1").name, long);
        assert_eq!(Action::new("", "g1").name, "");
    }

    #[test]
    fn test_set_key_mappings_allows_many_inputs_per_combination() {
        let mut action = Action::new("Jump", "g1");
        let id = action.id.clone();
        action.set_key_mappings([
            entry("KeyA", ModifierCombination::None, &id),
            entry("KeyB", ModifierCombination::None, &id),
            entry("KeyA", ModifierCombination::Shift, &id),
        ]);
        assert_eq!(action.key_mappings.len(), 3);
        assert_eq!(action.binding_labels(), vec!["KeyA", "Shift+KeyA", "KeyB"]);
    }

    #[test]
    fn test_serde_key_mappings_as_tag_pairs() {
        let mut action = Action::new("Jump", "g1");
        let id = action.id.clone();
        action.set_key_mappings([entry("KeyA", ModifierCombination::Shift, &id)]);

        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["colorGroupId"], "g1");
        assert_eq!(value["keyMappings"][0][0], "shift");
        assert_eq!(value["keyMappings"][0][1]["inputCode"], "KeyA");

        let parsed: Action = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, action);
    }

    #[test]
    fn test_deserialize_without_key_mappings() {
        let parsed: Action =
            serde_json::from_str(r#"{"id":"a1","name":"Jump","colorGroupId":"g1"}"#).unwrap();
        assert!(parsed.is_unmapped());

        let parsed: Action = serde_json::from_str(
            r#"{"id":"a1","name":"Jump","colorGroupId":"g1","keyMappings":null}"#,
        )
        .unwrap();
        assert!(parsed.is_unmapped());
    }

    #[test]
    fn test_action_update_constructors() {
        assert_eq!(ActionUpdate::name("X").name.as_deref(), Some("X"));
        assert_eq!(ActionUpdate::name("X").color_group_id, None);
        assert_eq!(ActionUpdate::color_group("g2").color_group_id.as_deref(), Some("g2"));
    }
}
