//! CLI command handlers for KBM Layout.
//!
//! This module provides headless, scriptable access to the binding engine
//! for automation and testing.

pub mod action;
pub mod bind;
pub mod common;
pub mod group;
pub mod reset;
pub mod resolve;
pub mod set;

// Re-export types used by main.rs and tests
pub use action::ActionArgs;
pub use bind::BindArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use group::GroupArgs;
pub use reset::ResetArgs;
pub use resolve::ResolveArgs;
pub use set::SetArgs;
