//! Modifier state tracking.
//!
//! Converts raw press/release events of the six physical modifier keys into a
//! canonical [`ModifierCombination`]. The physical state is the only source of
//! truth: the combination is recomputed from it on every transition.

use crate::models::{InputEvent, Modifier, ModifierCombination, PhysicalModifier};
use tracing::trace;

/// Pressed state of each physical modifier key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierPhysicalState {
    /// Left Control held
    pub ctrl_left: bool,
    /// Right Control held
    pub ctrl_right: bool,
    /// Left Alt held
    pub alt_left: bool,
    /// Right Alt held
    pub alt_right: bool,
    /// Left Shift held
    pub shift_left: bool,
    /// Right Shift held
    pub shift_right: bool,
}

impl ModifierPhysicalState {
    /// Either Control key held.
    #[inline]
    pub const fn ctrl(&self) -> bool {
        self.ctrl_left || self.ctrl_right
    }

    /// Either Alt key held.
    #[inline]
    pub const fn alt(&self) -> bool {
        self.alt_left || self.alt_right
    }

    /// Either Shift key held.
    #[inline]
    pub const fn shift(&self) -> bool {
        self.shift_left || self.shift_right
    }

    /// Whether the logical `modifier` is held on either side.
    pub const fn is_held(&self, modifier: Modifier) -> bool {
        match modifier {
            Modifier::Ctrl => self.ctrl(),
            Modifier::Alt => self.alt(),
            Modifier::Shift => self.shift(),
        }
    }

    /// Whether a specific physical key is held.
    pub const fn is_pressed(&self, key: PhysicalModifier) -> bool {
        match key {
            PhysicalModifier::ControlLeft => self.ctrl_left,
            PhysicalModifier::ControlRight => self.ctrl_right,
            PhysicalModifier::AltLeft => self.alt_left,
            PhysicalModifier::AltRight => self.alt_right,
            PhysicalModifier::ShiftLeft => self.shift_left,
            PhysicalModifier::ShiftRight => self.shift_right,
        }
    }

    fn set(&mut self, key: PhysicalModifier, pressed: bool) {
        let slot = match key {
            PhysicalModifier::ControlLeft => &mut self.ctrl_left,
            PhysicalModifier::ControlRight => &mut self.ctrl_right,
            PhysicalModifier::AltLeft => &mut self.alt_left,
            PhysicalModifier::AltRight => &mut self.alt_right,
            PhysicalModifier::ShiftLeft => &mut self.shift_left,
            PhysicalModifier::ShiftRight => &mut self.shift_right,
        };
        *slot = pressed;
    }

    /// Raw combination of everything held.
    pub const fn combination(&self) -> ModifierCombination {
        ModifierCombination::from_flags(self.ctrl(), self.alt(), self.shift())
    }
}

/// State machine over the physical modifier keys.
#[derive(Debug, Clone, Default)]
pub struct ModifierTracker {
    state: ModifierPhysicalState,
    combination: ModifierCombination,
}

impl ModifierTracker {
    /// Creates a tracker with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one input event. Returns `true` if the physical state changed.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::KeyTransition { code, pressed } => self.key_transition(code, *pressed),
            InputEvent::FocusChanged { focused } => self.focus_changed(*focused),
        }
    }

    /// Applies a press or release. Codes that are not modifier keys are
    /// ignored and return `false`.
    pub fn key_transition(&mut self, code: &str, pressed: bool) -> bool {
        let Some(key) = PhysicalModifier::from_code(code) else {
            return false;
        };

        let previous = self.state;
        self.state.set(key, pressed);
        self.combination = self.state.combination();

        if previous != self.state {
            trace!(
                "Modifier {} {} -> combination {}",
                key.code(),
                if pressed { "down" } else { "up" },
                self.combination
            );
        }
        previous != self.state
    }

    /// Focus transitions cannot observe real key state, so both gaining and
    /// losing focus reset everything to released.
    pub fn focus_changed(&mut self, _focused: bool) -> bool {
        self.reset()
    }

    /// Releases every modifier. Returns `true` if anything was held.
    pub fn reset(&mut self) -> bool {
        let changed = self.state != ModifierPhysicalState::default();
        self.state = ModifierPhysicalState::default();
        self.combination = ModifierCombination::None;
        changed
    }

    /// Current physical key state.
    pub const fn state(&self) -> ModifierPhysicalState {
        self.state
    }

    /// Raw combination of all held modifiers.
    pub const fn combination(&self) -> ModifierCombination {
        self.combination
    }

    /// Combination used to resolve other keys' bindings.
    ///
    /// A modifier whose own key is bound to an action (as reported by
    /// `is_modifier_key_bound`) does not contribute, so the key can act as an
    /// ordinary bindable input without shifting every other lookup.
    pub fn effective_combination(
        &self,
        is_modifier_key_bound: impl Fn(Modifier) -> bool,
    ) -> ModifierCombination {
        let contributes = |modifier: Modifier| {
            self.state.is_held(modifier) && !is_modifier_key_bound(modifier)
        };
        ModifierCombination::from_flags(
            contributes(Modifier::Ctrl),
            contributes(Modifier::Alt),
            contributes(Modifier::Shift),
        )
    }
}
