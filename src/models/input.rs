//! Raw input events and the catalog of known input codes.
//!
//! Codes are platform-neutral strings in the style of DOM `KeyboardEvent.code`
//! ("KeyA", "Digit1", "ControlLeft"), plus a small set of mouse codes.

use crate::models::DeviceType;

/// Event delivered by the input-capture collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key (or mouse button reported as a key) was pressed or released.
    KeyTransition {
        /// Input code of the key
        code: String,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// The window gained or lost input focus.
    FocusChanged {
        /// Whether the window now has focus
        focused: bool,
    },
}

impl InputEvent {
    /// Key press event.
    pub fn press(code: impl Into<String>) -> Self {
        Self::KeyTransition {
            code: code.into(),
            pressed: true,
        }
    }

    /// Key release event.
    pub fn release(code: impl Into<String>) -> Self {
        Self::KeyTransition {
            code: code.into(),
            pressed: false,
        }
    }
}

/// Mouse inputs that can be bound, with their display names.
pub const MOUSE_BUTTONS: [(&str, &str); 7] = [
    ("MouseLeft", "Left Click"),
    ("MouseMiddle", "Scroll"),
    ("MouseRight", "Right Click"),
    ("MouseScrollUp", "Scroll Up"),
    ("MouseScrollDown", "Scroll Down"),
    ("MouseBack", "Back"),
    ("MouseForward", "Forward"),
];

/// Classifies an input code by device.
#[must_use]
pub fn device_type_for(code: &str) -> DeviceType {
    if MOUSE_BUTTONS.iter().any(|(c, _)| *c == code) {
        DeviceType::Mouse
    } else {
        DeviceType::Keyboard
    }
}

/// Default human label for an input code.
///
/// ```
/// use kbm_layout::models::input::display_name_for;
///
/// assert_eq!(display_name_for("KeyA"), "A");
/// assert_eq!(display_name_for("Digit7"), "7");
/// assert_eq!(display_name_for("ShiftRight"), "Shift");
/// assert_eq!(display_name_for("MouseBack"), "Back");
/// assert_eq!(display_name_for("F5"), "F5");
/// ```
#[must_use]
pub fn display_name_for(code: &str) -> String {
    if let Some((_, name)) = MOUSE_BUTTONS.iter().find(|(c, _)| *c == code) {
        return (*name).to_string();
    }

    if let Some(rest) = code.strip_prefix("Key").filter(|r| r.len() == 1) {
        return rest.to_string();
    }
    if let Some(rest) = code.strip_prefix("Digit").filter(|r| r.len() == 1) {
        return rest.to_string();
    }
    if let Some(rest) = code.strip_prefix("Numpad") {
        return format!("Num {rest}");
    }

    let named = match code {
        "ControlLeft" | "ControlRight" => "Ctrl",
        "AltLeft" | "AltRight" => "Alt",
        "ShiftLeft" | "ShiftRight" => "Shift",
        "MetaLeft" | "MetaRight" => "Win",
        "Escape" => "Esc",
        "Space" => "Space",
        "Enter" => "Enter",
        "Backspace" => "⌫",
        "ArrowUp" => "↑",
        "ArrowDown" => "↓",
        "ArrowLeft" => "←",
        "ArrowRight" => "→",
        "ContextMenu" => "Menu",
        "Backquote" => "`",
        "Minus" => "-",
        "Equal" => "=",
        "BracketLeft" => "[",
        "BracketRight" => "]",
        "Backslash" => "\\",
        "Semicolon" => ";",
        "Quote" => "'",
        "Comma" => ",",
        "Period" => ".",
        "Slash" => "/",
        _ => code,
    };
    named.to_string()
}
