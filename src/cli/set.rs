//! Keybind set management commands.
//!
//! Provides commands to list, create, rename, delete, and select keybind sets.

use crate::cli::common::{find_set, print_json, validate_name, CliError, CliResult};
use crate::services::Session;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage keybind sets
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    /// Set subcommand
    #[command(subcommand)]
    pub command: SetCommand,
}

/// Keybind set subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum SetCommand {
    /// List all keybind sets
    List {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a keybind set and make it active
    Create {
        /// Set name
        name: String,
    },
    /// Rename a keybind set
    Rename {
        /// Set id or name
        set: String,
        /// New name
        name: String,
    },
    /// Delete a keybind set (the last one cannot be deleted)
    Delete {
        /// Set id or name
        set: String,
    },
    /// Make a keybind set active
    Select {
        /// Set id or name
        set: String,
    },
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetItem {
    id: String,
    name: String,
    selected: bool,
    actions: usize,
    bindings: usize,
    last_modified: String,
}

#[derive(Debug, Serialize)]
struct ListSetsResponse {
    sets: Vec<SetItem>,
    selected: Option<String>,
    count: usize,
}

impl SetArgs {
    /// Execute the set command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        match &self.command {
            SetCommand::List { json } => list(session, *json),
            SetCommand::Create { name } => {
                let name = validate_name("Keybind set", name)?;
                let set = session.create_set(&name);
                println!("Keybind set '{}' created ({}).", set.name, set.id);
                Ok(())
            }
            SetCommand::Rename { set, name } => {
                let name = validate_name("Keybind set", name)?;
                let id = find_set(session, set)?.id.clone();
                session.rename_set(&id, &name);
                println!("Keybind set renamed to '{name}'.");
                Ok(())
            }
            SetCommand::Delete { set } => {
                let found = find_set(session, set)?;
                let (id, name) = (found.id.clone(), found.name.clone());
                if !session.delete_set(&id) {
                    return Err(CliError::validation(
                        "Cannot delete the last remaining keybind set",
                    ));
                }
                println!("Keybind set '{name}' deleted.");
                Ok(())
            }
            SetCommand::Select { set } => {
                let found = find_set(session, set)?;
                let (id, name) = (found.id.clone(), found.name.clone());
                session.select_set(&id);
                println!("Keybind set '{name}' is now active.");
                Ok(())
            }
        }
    }
}

fn list(session: &Session, json: bool) -> CliResult<()> {
    let registry = session.keybind_sets();
    let sets: Vec<SetItem> = registry
        .sets()
        .iter()
        .map(|set| SetItem {
            id: set.id.clone(),
            name: set.name.clone(),
            selected: registry.selected_id() == Some(set.id.as_str()),
            actions: set.actions.len(),
            bindings: set.bindings.len(),
            last_modified: set.last_modified.to_rfc3339(),
        })
        .collect();

    let response = ListSetsResponse {
        count: sets.len(),
        selected: registry.selected_id().map(str::to_string),
        sets,
    };

    if json {
        return print_json(&response);
    }

    println!("Keybind sets ({}):", response.count);
    println!();
    for set in response.sets {
        let marker = if set.selected { "*" } else { " " };
        println!(
            "{} {:<38} {:<30} {} action(s), {} binding(s)",
            marker, set.id, set.name, set.actions, set.bindings
        );
    }
    Ok(())
}
