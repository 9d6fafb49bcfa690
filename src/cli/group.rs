//! Color group management commands.
//!
//! Provides commands to list, add, update, and delete color groups in the
//! active keybind set.

use crate::cli::common::{find_color_group, print_json, validate_name, CliError, CliResult};
use crate::models::RgbColor;
use crate::services::Session;
use clap::{Args, Subcommand};
use regex::Regex;
use serde::Serialize;

/// Manage color groups of the active keybind set
#[derive(Debug, Clone, Args)]
pub struct GroupArgs {
    /// Group subcommand
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Color group subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum GroupCommand {
    /// List all color groups
    List {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a color group
    Add {
        /// Group name
        name: String,
        /// Color in hex format (#RRGGBB or #RGB)
        color: String,
    },
    /// Rename and/or recolor a color group
    Update {
        /// Group id or name
        group: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New color in hex format (#RRGGBB or #RGB)
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a color group (actions keep it and render with the fallback color)
    Delete {
        /// Group id or name
        group: String,
    },
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupItem {
    id: String,
    name: String,
    color: String,
    is_default: bool,
    actions: usize,
}

#[derive(Debug, Serialize)]
struct ListGroupsResponse {
    groups: Vec<GroupItem>,
    count: usize,
}

impl GroupArgs {
    /// Execute the group command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        match &self.command {
            GroupCommand::List { json } => list(session, *json),
            GroupCommand::Add { name, color } => {
                let name = validate_name("Color group", name)?;
                let color = validate_and_parse_hex(color).map_err(CliError::validation)?;
                let group = session.add_color_group(&name, color);
                println!("Color group '{}' added ({}).", group.name, group.id);
                Ok(())
            }
            GroupCommand::Update { group, name, color } => {
                if name.is_none() && color.is_none() {
                    return Err(CliError::validation("Nothing to update: pass --name or --color"));
                }
                let color = color
                    .as_deref()
                    .map(validate_and_parse_hex)
                    .transpose()
                    .map_err(CliError::validation)?;
                let name = name
                    .as_deref()
                    .map(|name| validate_name("Color group", name))
                    .transpose()?;
                let id = find_color_group(session, group)?.id.clone();

                session.update_color_group(&id, name.as_deref(), color);
                println!("Color group updated.");
                Ok(())
            }
            GroupCommand::Delete { group } => {
                let found = find_color_group(session, group)?;
                let (id, name) = (found.id.clone(), found.name.clone());
                session.delete_color_group(&id);
                println!("Color group '{name}' deleted.");
                Ok(())
            }
        }
    }
}

fn list(session: &Session, json: bool) -> CliResult<()> {
    let groups: Vec<GroupItem> = session
        .color_groups()
        .iter()
        .map(|group| GroupItem {
            id: group.id.clone(),
            name: group.name.clone(),
            color: group.color.to_hex(),
            is_default: group.is_default,
            actions: session
                .actions()
                .iter()
                .filter(|a| a.color_group_id == group.id)
                .count(),
        })
        .collect();

    let response = ListGroupsResponse {
        count: groups.len(),
        groups,
    };

    if json {
        return print_json(&response);
    }

    if response.count == 0 {
        println!("No color groups defined.");
        return Ok(());
    }
    println!("Color groups ({}):", response.count);
    println!();
    for group in response.groups {
        println!(
            "  {:<38} {:<30} {} {} action(s)",
            group.id, group.name, group.color, group.actions
        );
    }
    Ok(())
}

/// Validates hex color format (#RRGGBB or #RGB) and returns `RgbColor`
fn validate_and_parse_hex(color: &str) -> Result<RgbColor, String> {
    let hex_regex = Regex::new(r"^#([0-9A-Fa-f]{6}|[0-9A-Fa-f]{3})$")
        .map_err(|_| "Failed to create hex regex".to_string())?;

    if !hex_regex.is_match(color) {
        return Err(format!(
            "Invalid hex color format: '{color}'. Expected #RRGGBB or #RGB"
        ));
    }

    RgbColor::from_hex(color).map_err(|e| format!("Failed to parse color: {e}"))
}
