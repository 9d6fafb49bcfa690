//! Data models for actions, bindings, color groups, and input events.
//!
//! This module contains the plain data structures shared by the engine.
//! Models are independent of storage and of any UI.

pub mod action;
pub mod binding;
pub mod color_group;
pub mod input;
pub mod modifiers;
pub mod rgb;

// Re-export all model types
pub use action::{Action, ActionUpdate};
pub use binding::{BindingEntry, BindingKey, DeviceType};
pub use color_group::ColorGroup;
pub use input::InputEvent;
pub use modifiers::{Modifier, ModifierCombination, PhysicalModifier};
pub use rgb::RgbColor;
