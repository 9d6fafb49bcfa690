//! Action management commands.
//!
//! Provides commands to list, add, rename, regroup, clear, and delete actions
//! in the active keybind set.

use crate::cli::common::{
    find_action, find_color_group, print_json, validate_name, CliError, CliResult,
};
use crate::models::ActionUpdate;
use crate::services::Session;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage actions of the active keybind set
#[derive(Debug, Clone, Args)]
pub struct ActionArgs {
    /// Action subcommand
    #[command(subcommand)]
    pub command: ActionCommand,
}

/// Action subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum ActionCommand {
    /// List all actions with their bindings
    List {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add an unmapped action
    Add {
        /// Action name
        name: String,
        /// Color group id or name (default: the set's default group)
        #[arg(long, value_name = "GROUP")]
        group: Option<String>,
    },
    /// Rename an action
    Rename {
        /// Action id or name
        action: String,
        /// New name
        name: String,
    },
    /// Move an action to another color group
    SetGroup {
        /// Action id or name
        action: String,
        /// Color group id or name
        group: String,
    },
    /// Delete an action and all of its bindings
    Delete {
        /// Action id or name
        action: String,
    },
    /// Remove every binding of an action but keep the action
    Clear {
        /// Action id or name
        action: String,
    },
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionItem {
    id: String,
    name: String,
    color_group_id: String,
    color: String,
    bindings: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ListActionsResponse {
    actions: Vec<ActionItem>,
    count: usize,
}

impl ActionArgs {
    /// Execute the action command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        match &self.command {
            ActionCommand::List { json } => list(session, *json),
            ActionCommand::Add { name, group } => add(session, name, group.as_deref()),
            ActionCommand::Rename { action, name } => {
                let name = validate_name("Action", name)?;
                let id = find_action(session, action)?.id.clone();
                session.update_action(&id, ActionUpdate::name(name.as_str()));
                println!("Action renamed to '{name}'.");
                Ok(())
            }
            ActionCommand::SetGroup { action, group } => {
                let id = find_action(session, action)?.id.clone();
                let found = find_color_group(session, group)?;
                let (group_id, group_name) = (found.id.clone(), found.name.clone());
                session.update_action(&id, ActionUpdate::color_group(group_id));
                println!("Action moved to color group '{group_name}'.");
                Ok(())
            }
            ActionCommand::Delete { action } => {
                let found = find_action(session, action)?;
                let (id, name) = (found.id.clone(), found.name.clone());
                session.delete_action(&id);
                println!("Action '{name}' deleted.");
                Ok(())
            }
            ActionCommand::Clear { action } => {
                let found = find_action(session, action)?;
                let (id, name) = (found.id.clone(), found.name.clone());
                session.clear_action_mappings(&id);
                println!("Cleared all bindings of action '{name}'.");
                Ok(())
            }
        }
    }
}

fn add(session: &mut Session, name: &str, group: Option<&str>) -> CliResult<()> {
    let name = validate_name("Action", name)?;
    let group_id = match group {
        Some(group) => find_color_group(session, group)?.id.clone(),
        None => session
            .color_groups()
            .iter()
            .find(|g| g.is_default)
            .or_else(|| session.color_groups().first())
            .map(|g| g.id.clone())
            .ok_or_else(|| CliError::validation("No color group available, pass --group"))?,
    };

    let action = session.add_action(&name, &group_id);
    println!("Action '{}' added ({}).", action.name, action.id);
    Ok(())
}

fn list(session: &Session, json: bool) -> CliResult<()> {
    let actions: Vec<ActionItem> = session
        .actions()
        .iter()
        .map(|action| ActionItem {
            id: action.id.clone(),
            name: action.name.clone(),
            color_group_id: action.color_group_id.clone(),
            color: session.action_color(action).to_hex(),
            bindings: action.binding_labels(),
        })
        .collect();

    let response = ListActionsResponse {
        count: actions.len(),
        actions,
    };

    if json {
        return print_json(&response);
    }

    if response.count == 0 {
        println!("No actions defined.");
        return Ok(());
    }
    println!("Actions ({}):", response.count);
    println!();
    for action in response.actions {
        let bindings = if action.bindings.is_empty() {
            "(unmapped)".to_string()
        } else {
            action.bindings.join(", ")
        };
        println!(
            "  {:<38} {:<30} {} {}",
            action.id, action.name, action.color, bindings
        );
    }
    Ok(())
}
