//! Shared CLI plumbing: errors, exit codes, session setup and lookups.

use crate::models::{Action, ColorGroup};
use crate::services::{FileStore, KeybindSet, PersistenceGateway, Session};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input or a rejected precondition
    ValidationError = 1,
    /// Filesystem or serialization failure
    IoError = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}

/// Error reported by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to terminate with
    pub kind: ExitCode,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Bad input or rejected precondition.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::ValidationError,
            message: message.into(),
        }
    }

    /// Filesystem or serialization failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::IoError,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Opens the file-backed session stored in `data_dir`.
pub fn open_session(data_dir: &Path) -> CliResult<Session> {
    fs::create_dir_all(data_dir).map_err(|e| {
        CliError::io(format!(
            "Failed to create data directory {}: {e}",
            data_dir.display()
        ))
    })?;
    Ok(Session::open(PersistenceGateway::new(FileStore::new(data_dir))))
}

/// Prints `value` as one line of JSON.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Longest accepted name for actions, color groups and keybind sets.
pub const MAX_NAME_LEN: usize = 50;

/// Trims `name` and checks it is non-empty and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(kind: &str, name: &str) -> CliResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CliError::validation(format!("{kind} name cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CliError::validation(format!(
            "{kind} name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Finds by exact id first, then by unique (case-insensitive) name.
fn find_by_id_or_name<'a, T>(
    items: &'a [T],
    key: &str,
    kind: &str,
    id: impl Fn(&T) -> &str,
    name: impl Fn(&T) -> &str,
) -> CliResult<&'a T> {
    if let Some(item) = items.iter().find(|item| id(item) == key) {
        return Ok(item);
    }

    let mut matches = items.iter().filter(|item| name(item).eq_ignore_ascii_case(key));
    match (matches.next(), matches.next()) {
        (Some(item), None) => Ok(item),
        (Some(_), Some(_)) => Err(CliError::validation(format!(
            "{kind} name '{key}' is ambiguous, use the id"
        ))),
        (None, _) => Err(CliError::validation(format!("{kind} '{key}' not found"))),
    }
}

/// Resolves an action of the active set by id or name.
pub fn find_action<'a>(session: &'a Session, key: &str) -> CliResult<&'a Action> {
    find_by_id_or_name(
        session.actions(),
        key,
        "Action",
        |a| a.id.as_str(),
        |a| a.name.as_str(),
    )
}

/// Resolves a color group of the active set by id or name.
pub fn find_color_group<'a>(session: &'a Session, key: &str) -> CliResult<&'a ColorGroup> {
    find_by_id_or_name(
        session.color_groups(),
        key,
        "Color group",
        |g| g.id.as_str(),
        |g| g.name.as_str(),
    )
}

/// Resolves a keybind set by id or name.
pub fn find_set<'a>(session: &'a Session, key: &str) -> CliResult<&'a KeybindSet> {
    find_by_id_or_name(
        session.keybind_sets().sets(),
        key,
        "Keybind set",
        |s| s.id.as_str(),
        |s| s.name.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success as u8, 0);
        assert_eq!(ExitCode::ValidationError as u8, 1);
        assert_eq!(ExitCode::IoError as u8, 2);
    }

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Action", "  Jump ").unwrap(), "Jump");
        assert_eq!(validate_name("Action", &"x".repeat(50)).unwrap().len(), 50);

        let err = validate_name("Action", "   ").unwrap_err();
        assert_eq!(err.kind, ExitCode::ValidationError);
        assert!(err.message.contains("empty"));

        let err = validate_name("Keybind set", &"x".repeat(51)).unwrap_err();
        assert!(err.message.starts_with("Keybind set name"));
        assert!(err.message.contains("50"));
    }

    #[test]
    fn test_find_action_by_id_and_name() {
        let mut session = Session::in_memory();
        let group = session.color_groups()[0].id.clone();
        let jump = session.add_action("Jump", &group);
        session.add_action("Crouch", &group);
        session.add_action("Crouch", &group);

        assert_eq!(find_action(&session, &jump.id).unwrap().id, jump.id);
        assert_eq!(find_action(&session, "jump").unwrap().id, jump.id);

        let err = find_action(&session, "Crouch").unwrap_err();
        assert_eq!(err.kind, ExitCode::ValidationError);
        assert!(err.message.contains("ambiguous"));
        assert!(find_action(&session, "Fly").is_err());
    }

    #[test]
    fn test_find_color_group_and_set() {
        let session = Session::in_memory();
        assert!(find_color_group(&session, "Default").is_ok());
        assert!(find_set(&session, "default").is_ok());
        assert!(find_set(&session, "Other").is_err());
    }
}
