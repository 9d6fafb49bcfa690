//! Binding entries and their composite store key.

use crate::models::ModifierCombination;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of device an input code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// Keyboard key
    #[default]
    Keyboard,
    /// Mouse button or wheel direction
    Mouse,
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keyboard => f.write_str("keyboard"),
            Self::Mouse => f.write_str("mouse"),
        }
    }
}

impl FromStr for DeviceType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keyboard" => Ok(Self::Keyboard),
            "mouse" => Ok(Self::Mouse),
            other => anyhow::bail!("Unknown device type '{other}'. Expected keyboard or mouse"),
        }
    }
}

/// Composite key of the binding store: one physical input under one
/// modifier combination.
///
/// Ordered by input code first so listings group all combinations of a key
/// together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingKey {
    /// Opaque input code (e.g. "KeyA", "MouseLeft")
    pub input_code: String,
    /// Modifier combination the input is bound under
    pub modifiers: ModifierCombination,
}

impl BindingKey {
    /// Creates a new composite key.
    pub fn new(input_code: impl Into<String>, modifiers: ModifierCombination) -> Self {
        Self {
            input_code: input_code.into(),
            modifiers,
        }
    }
}

/// Formats as `"<inputCode>:<tag>"`, the form used in stored documents.
impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.input_code, self.modifiers.tag())
    }
}

impl FromStr for BindingKey {
    type Err = anyhow::Error;

    /// Splits on the last colon, so input codes containing colons survive.
    fn from_str(s: &str) -> Result<Self> {
        let (code, tag) = s
            .rsplit_once(':')
            .with_context(|| format!("Binding key '{s}' has no ':<modifiers>' suffix"))?;
        if code.is_empty() {
            anyhow::bail!("Binding key '{s}' has an empty input code");
        }
        let modifiers = tag
            .parse()
            .with_context(|| format!("Invalid modifier tag in binding key '{s}'"))?;
        Ok(Self::new(code, modifiers))
    }
}

/// Assignment of one physical input, under one modifier combination, to one
/// action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingEntry {
    /// Opaque input code (e.g. "KeyA", "MouseLeft")
    pub input_code: String,
    /// Device the input belongs to
    pub device_type: DeviceType,
    /// Human label shown on the key (e.g. "A", "Left Click")
    pub display_name: String,
    /// Modifier combination the input is bound under
    pub modifier_combination: ModifierCombination,
    /// Action this input fires
    pub action_id: String,
}

impl BindingEntry {
    /// Creates a new binding entry.
    pub fn new(
        input_code: impl Into<String>,
        device_type: DeviceType,
        display_name: impl Into<String>,
        modifier_combination: ModifierCombination,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            input_code: input_code.into(),
            device_type,
            display_name: display_name.into(),
            modifier_combination,
            action_id: action_id.into(),
        }
    }

    /// The composite key this entry is stored under.
    #[must_use]
    pub fn key(&self) -> BindingKey {
        BindingKey::new(self.input_code.clone(), self.modifier_combination)
    }

    /// Label including modifiers, e.g. "Ctrl+Shift+A".
    #[must_use]
    pub fn display_label(&self) -> String {
        if self.modifier_combination.is_none() {
            self.display_name.clone()
        } else {
            format!("{}+{}", self.modifier_combination.label(), self.display_name)
        }
    }
}
