//! Color groups for tagging actions visually.

use crate::models::RgbColor;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Named color shared by any number of actions.
///
/// Actions reference a group by id only. Deleting a group leaves those
/// references dangling; lookups resolve them to [`RgbColor::FALLBACK`].
///
/// # Invariants
///
/// - ID is generated once and never changes
/// - Color must be valid RGB (enforced by `RgbColor` type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorGroup {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display name (e.g., "Movement", "Combat")
    pub name: String,
    /// Color applied to every action in the group
    pub color: RgbColor,
    /// Marks the group created together with its keybind set
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_default: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

impl ColorGroup {
    /// Creates a new color group with a fresh id.
    ///
    /// # Examples
    ///
    /// ```
    /// use kbm_layout::models::{ColorGroup, RgbColor};
    ///
    /// let group = ColorGroup::new("Movement", RgbColor::new(0x44, 0xFF, 0x44));
    /// assert_eq!(group.name, "Movement");
    /// assert!(!group.is_default);
    /// ```
    pub fn new(name: impl Into<String>, color: RgbColor) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            color,
            is_default: false,
        }
    }

    /// The group every new keybind set starts with.
    #[must_use]
    pub fn default_group() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Default".to_string(),
            color: RgbColor::DEFAULT_GROUP,
            is_default: true,
        }
    }

    /// Updates the group color.
    pub const fn set_color(&mut self, color: RgbColor) {
        self.color = color;
    }

    /// Updates the group name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let a = ColorGroup::new("Red", RgbColor::new(255, 0, 0));
        let b = ColorGroup::new("Red", RgbColor::new(255, 0, 0));
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_group() {
        let group = ColorGroup::default_group();
        assert!(group.is_default);
        assert_eq!(group.name, "Default");
        assert_eq!(group.color.to_hex(), "#2196F3");
    }

    #[test]
    fn test_set_name_and_color() {
        let mut group = ColorGroup::new("Test", RgbColor::new(255, 0, 0));
        group.set_name("Renamed");
        group.set_color(RgbColor::new(0, 255, 0));
        assert_eq!(group.name, "Renamed");
        assert_eq!(group.color, RgbColor::new(0, 255, 0));
    }

    #[test]
    fn test_serde_shape() {
        let group = ColorGroup {
            id: "g1".to_string(),
            name: "Default".to_string(),
            color: RgbColor::DEFAULT_GROUP,
            is_default: true,
        };
        let value = serde_json::to_value(&group).unwrap();
        assert_eq!(value["color"], "#2196F3");
        assert_eq!(value["isDefault"], true);

        let plain = ColorGroup {
            is_default: false,
            ..group
        };
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("isDefault").is_none());

        let parsed: ColorGroup =
            serde_json::from_str(r##"{"id":"x","name":"X","color":"#ff4444"}"##).unwrap();
        assert!(!parsed.is_default);
        assert_eq!(parsed.color, RgbColor::new(0xFF, 0x44, 0x44));
    }
}
