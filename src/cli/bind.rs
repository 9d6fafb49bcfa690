//! Binding commands.
//!
//! Provides commands to bind inputs to actions, clear slots, and list the
//! bindings of the active keybind set.

use crate::cli::common::{find_action, print_json, CliError, CliResult};
use crate::models::input::{device_type_for, display_name_for};
use crate::models::{BindingEntry, DeviceType, ModifierCombination};
use crate::services::Session;
use clap::{Args, Subcommand};
use serde::Serialize;

/// Manage bindings of the active keybind set
#[derive(Debug, Clone, Args)]
pub struct BindArgs {
    /// Bind subcommand
    #[command(subcommand)]
    pub command: BindCommand,
}

/// Binding subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum BindCommand {
    /// Bind an input to an action, evicting whatever held the slot
    Add {
        /// Action id or name
        action: String,
        /// Input code (e.g. KeyA, Digit1, MouseLeft)
        input: String,
        /// Modifier combination (e.g. none, ctrl, ctrl+shift)
        #[arg(long, value_name = "TAG", default_value = "none")]
        mods: ModifierCombination,
        /// Display name (default derived from the input code)
        #[arg(long, value_name = "NAME")]
        display: Option<String>,
    },
    /// Clear the binding at one slot
    Remove {
        /// Input code
        input: String,
        /// Modifier combination
        #[arg(long, value_name = "TAG", default_value = "none")]
        mods: ModifierCombination,
    },
    /// List all bindings
    List {
        /// Output results as JSON
        #[arg(long)]
        json: bool,
    },
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BindingItem {
    input_code: String,
    device_type: DeviceType,
    display_name: String,
    modifier_combination: ModifierCombination,
    action_id: String,
    action_name: String,
}

#[derive(Debug, Serialize)]
struct ListBindingsResponse {
    bindings: Vec<BindingItem>,
    count: usize,
}

impl BindArgs {
    /// Execute the bind command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        match &self.command {
            BindCommand::Add {
                action,
                input,
                mods,
                display,
            } => add(session, action, input, *mods, display.as_deref()),
            BindCommand::Remove { input, mods } => match session.unbind(input, *mods) {
                Some(_) => {
                    println!("Binding {}:{} removed.", input, mods.tag());
                    Ok(())
                }
                None => Err(CliError::validation(format!(
                    "No binding at {}:{}",
                    input,
                    mods.tag()
                ))),
            },
            BindCommand::List { json } => list(session, *json),
        }
    }
}

fn add(
    session: &mut Session,
    action: &str,
    input: &str,
    mods: ModifierCombination,
    display: Option<&str>,
) -> CliResult<()> {
    let input = input.trim();
    if input.is_empty() {
        return Err(CliError::validation("Input code cannot be empty"));
    }

    let device = device_type_for(input);
    if device == DeviceType::Mouse && !mods.is_none() {
        return Err(CliError::validation(format!(
            "Mouse input '{input}' cannot be bound with modifiers"
        )));
    }

    let found = find_action(session, action)?;
    let (action_id, action_name) = (found.id.clone(), found.name.clone());
    let display = display.map_or_else(|| display_name_for(input), str::to_string);

    let owned = session.bind(input, device, &display, mods, &action_id);
    let label = owned
        .iter()
        .find(|entry| entry.input_code == input && entry.modifier_combination == mods)
        .map_or_else(|| display.clone(), BindingEntry::display_label);
    println!(
        "Bound {label} to '{action_name}' ({} binding(s) total).",
        owned.len()
    );
    Ok(())
}

fn list(session: &Session, json: bool) -> CliResult<()> {
    let bindings: Vec<BindingItem> = session
        .bindings()
        .entries()
        .into_iter()
        .map(|entry| BindingItem {
            input_code: entry.input_code.clone(),
            device_type: entry.device_type,
            display_name: entry.display_name.clone(),
            modifier_combination: entry.modifier_combination,
            action_id: entry.action_id.clone(),
            action_name: session
                .get_action(&entry.action_id)
                .map(|a| a.name.clone())
                .unwrap_or_default(),
        })
        .collect();

    let response = ListBindingsResponse {
        count: bindings.len(),
        bindings,
    };

    if json {
        return print_json(&response);
    }

    if response.count == 0 {
        println!("No bindings defined.");
        return Ok(());
    }
    println!("Bindings ({}):", response.count);
    println!();
    for binding in response.bindings {
        println!(
            "  {:<24} {:<16} {:<9} {}",
            format!("{}:{}", binding.input_code, binding.modifier_combination.tag()),
            binding.display_name,
            binding.device_type,
            binding.action_name
        );
    }
    Ok(())
}
