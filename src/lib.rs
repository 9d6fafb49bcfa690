//! KBM Layout Library
//!
//! This library provides the binding resolution engine behind KBM Layout:
//! user-defined actions bound to keyboard keys and mouse buttons under
//! modifier combinations, grouped into independently persisted keybind sets.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod services;
