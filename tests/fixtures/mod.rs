//! Shared test fixtures for engine, persistence, and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use kbm_layout::models::{DeviceType, ModifierCombination};
use kbm_layout::services::{FileStore, PersistenceGateway, Session};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the kbm-layout binary (set by cargo at compile time)
pub fn kbm_bin() -> &'static str {
    env!("CARGO_BIN_EXE_kbm-layout")
}

/// Opens a file-backed session in `dir`.
pub fn open_file_session(dir: &Path) -> Session {
    Session::open(PersistenceGateway::new(FileStore::new(dir)))
}

/// Creates a file-backed session in a fresh temp directory.
///
/// # Returns
/// The session and the temp dir (keep it alive for the test's duration).
pub fn temp_file_session() -> (Session, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let session = open_file_session(temp_dir.path());
    (session, temp_dir)
}

/// Id of the default color group of the active set.
pub fn default_group_id(session: &Session) -> String {
    session
        .color_groups()
        .iter()
        .find(|g| g.is_default)
        .expect("Active set has no default group")
        .id
        .clone()
}

/// Adds one action per name to the active set and returns their ids.
pub fn add_actions(session: &mut Session, names: &[&str]) -> Vec<String> {
    let group = default_group_id(session);
    names
        .iter()
        .map(|name| session.add_action(name, &group).id)
        .collect()
}

/// Binds a keyboard key (display name = code) to an action.
pub fn bind_key(session: &mut Session, code: &str, combo: ModifierCombination, action_id: &str) {
    session.bind(code, DeviceType::Keyboard, code, combo, action_id);
}

/// Checks that every store slot is mirrored by exactly one action's
/// `key_mappings`, with matching fields, and nothing else is mirrored.
pub fn assert_projection_consistent(session: &Session) {
    for entry in session.bindings().entries() {
        let owners: Vec<_> = session
            .actions()
            .iter()
            .filter(|a| a.key_mappings.get(&entry.key()) == Some(entry))
            .collect();
        assert_eq!(
            owners.len(),
            1,
            "slot {} should be mirrored by exactly one action",
            entry.key()
        );
        assert_eq!(owners[0].id, entry.action_id);
    }

    let mirrored: usize = session.actions().iter().map(|a| a.key_mappings.len()).sum();
    assert_eq!(mirrored, session.bindings().len(), "projection has stale entries");
}

/// Runs the CLI against `data_dir` with an isolated (absent) config file.
pub fn run_cli(data_dir: &Path, args: &[&str]) -> Output {
    let config = data_dir.join("no-config.toml");
    Command::new(kbm_bin())
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--config")
        .arg(&config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

/// Runs the CLI, asserts success, and parses stdout as JSON.
pub fn run_json(data_dir: &Path, args: &[&str]) -> Value {
    let output = run_cli(data_dir, args);
    assert_eq!(
        output.status.code(),
        Some(0),
        "command {args:?} failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

/// Runs the CLI and asserts success.
pub fn run_ok(data_dir: &Path, args: &[&str]) -> String {
    let output = run_cli(data_dir, args);
    assert_eq!(
        output.status.code(),
        Some(0),
        "command {args:?} failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
