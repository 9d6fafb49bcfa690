//! Modifier keys and the canonical modifier combinations bindings are keyed by.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three logical modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    /// Control (either side)
    Ctrl,
    /// Alt/Option (either side)
    Alt,
    /// Shift (either side)
    Shift,
}

impl Modifier {
    /// All logical modifiers.
    pub const ALL: [Self; 3] = [Self::Ctrl, Self::Alt, Self::Shift];

    /// Left and right physical key codes that produce this modifier.
    #[must_use]
    pub const fn key_codes(self) -> [&'static str; 2] {
        match self {
            Self::Ctrl => ["ControlLeft", "ControlRight"],
            Self::Alt => ["AltLeft", "AltRight"],
            Self::Shift => ["ShiftLeft", "ShiftRight"],
        }
    }

    /// Lowercase name used in combination tags.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A physical modifier key, left and right distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicalModifier {
    /// Left Control
    ControlLeft,
    /// Right Control
    ControlRight,
    /// Left Alt/Option
    AltLeft,
    /// Right Alt/Option
    AltRight,
    /// Left Shift
    ShiftLeft,
    /// Right Shift
    ShiftRight,
}

impl PhysicalModifier {
    /// All physical modifier keys (left side first for each modifier).
    pub const ALL: [Self; 6] = [
        Self::ControlLeft,
        Self::ControlRight,
        Self::AltLeft,
        Self::AltRight,
        Self::ShiftLeft,
        Self::ShiftRight,
    ];

    /// Recognizes a platform-neutral key code as a physical modifier.
    ///
    /// Returns `None` for every code that is not one of the six modifier keys.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ControlLeft" => Some(Self::ControlLeft),
            "ControlRight" => Some(Self::ControlRight),
            "AltLeft" => Some(Self::AltLeft),
            "AltRight" => Some(Self::AltRight),
            "ShiftLeft" => Some(Self::ShiftLeft),
            "ShiftRight" => Some(Self::ShiftRight),
            _ => None,
        }
    }

    /// The key code this modifier key reports.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ControlLeft => "ControlLeft",
            Self::ControlRight => "ControlRight",
            Self::AltLeft => "AltLeft",
            Self::AltRight => "AltRight",
            Self::ShiftLeft => "ShiftLeft",
            Self::ShiftRight => "ShiftRight",
        }
    }

    /// The logical modifier this key contributes to.
    #[must_use]
    pub const fn modifier(self) -> Modifier {
        match self {
            Self::ControlLeft | Self::ControlRight => Modifier::Ctrl,
            Self::AltLeft | Self::AltRight => Modifier::Alt,
            Self::ShiftLeft | Self::ShiftRight => Modifier::Shift,
        }
    }
}

/// Canonical modifier combination a binding is keyed by.
///
/// Serialized with its lowercase tag (`"none"`, `"ctrl+alt"`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum ModifierCombination {
    /// No modifier held
    #[default]
    #[serde(rename = "none")]
    None,
    /// Ctrl
    #[serde(rename = "ctrl")]
    Ctrl,
    /// Alt
    #[serde(rename = "alt")]
    Alt,
    /// Shift
    #[serde(rename = "shift")]
    Shift,
    /// Ctrl+Alt
    #[serde(rename = "ctrl+alt")]
    CtrlAlt,
    /// Ctrl+Shift
    #[serde(rename = "ctrl+shift")]
    CtrlShift,
    /// Alt+Shift
    #[serde(rename = "alt+shift")]
    AltShift,
    /// Ctrl+Alt+Shift
    #[serde(rename = "ctrl+alt+shift")]
    CtrlAltShift,
}

impl ModifierCombination {
    /// All eight combinations.
    pub const ALL: [Self; 8] = [
        Self::None,
        Self::Ctrl,
        Self::Alt,
        Self::Shift,
        Self::CtrlAlt,
        Self::CtrlShift,
        Self::AltShift,
        Self::CtrlAltShift,
    ];

    /// Collapses the three logical flags into a combination.
    ///
    /// Checked in fixed priority: all three, then the pairs (ctrl+alt,
    /// ctrl+shift, alt+shift), then the single modifiers.
    #[must_use]
    pub const fn from_flags(ctrl: bool, alt: bool, shift: bool) -> Self {
        if ctrl && alt && shift {
            Self::CtrlAltShift
        } else if ctrl && alt {
            Self::CtrlAlt
        } else if ctrl && shift {
            Self::CtrlShift
        } else if alt && shift {
            Self::AltShift
        } else if ctrl {
            Self::Ctrl
        } else if alt {
            Self::Alt
        } else if shift {
            Self::Shift
        } else {
            Self::None
        }
    }

    /// Whether the combination includes `modifier`.
    #[must_use]
    pub const fn contains(self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => matches!(
                self,
                Self::Ctrl | Self::CtrlAlt | Self::CtrlShift | Self::CtrlAltShift
            ),
            Modifier::Alt => matches!(
                self,
                Self::Alt | Self::CtrlAlt | Self::AltShift | Self::CtrlAltShift
            ),
            Modifier::Shift => matches!(
                self,
                Self::Shift | Self::CtrlShift | Self::AltShift | Self::CtrlAltShift
            ),
        }
    }

    /// The same combination with `modifier` removed.
    #[must_use]
    pub const fn without(self, modifier: Modifier) -> Self {
        let ctrl = self.contains(Modifier::Ctrl) && !matches!(modifier, Modifier::Ctrl);
        let alt = self.contains(Modifier::Alt) && !matches!(modifier, Modifier::Alt);
        let shift = self.contains(Modifier::Shift) && !matches!(modifier, Modifier::Shift);
        Self::from_flags(ctrl, alt, shift)
    }

    /// Check if no modifiers are held
    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        matches!(self, Self::None)
    }

    /// Lowercase tag used in storage and composite keys.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ctrl => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::CtrlAlt => "ctrl+alt",
            Self::CtrlShift => "ctrl+shift",
            Self::AltShift => "alt+shift",
            Self::CtrlAltShift => "ctrl+alt+shift",
        }
    }

    /// Human readable label ("Ctrl+Shift"); empty for `None`.
    #[must_use]
    pub fn label(self) -> String {
        Modifier::ALL
            .iter()
            .filter(|m| self.contains(**m))
            .map(|m| match m {
                Modifier::Ctrl => "Ctrl",
                Modifier::Alt => "Alt",
                Modifier::Shift => "Shift",
            })
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl fmt::Display for ModifierCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ModifierCombination {
    type Err = anyhow::Error;

    /// Parses a tag. Modifier order and case are not significant, so
    /// `"Shift+Ctrl"` parses as `ctrl+shift`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim().to_ascii_lowercase();
        if s.is_empty() || s == "none" {
            return Ok(Self::None);
        }

        let (mut ctrl, mut alt, mut shift) = (false, false, false);
        for part in s.split('+') {
            match part.trim() {
                "ctrl" | "control" => ctrl = true,
                "alt" | "option" => alt = true,
                "shift" => shift = true,
                other => anyhow::bail!(
                    "Unknown modifier '{other}' in '{s}'. Expected ctrl, alt, shift, or none"
                ),
            }
        }

        Ok(Self::from_flags(ctrl, alt, shift))
    }
}
