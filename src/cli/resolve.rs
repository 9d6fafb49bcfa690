//! Resolve command: which action fires for an input right now.
//!
//! Replays held modifier keys through the modifier tracker, then looks the
//! input up under the resulting effective combination.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::models::{InputEvent, ModifierCombination, PhysicalModifier};
use crate::services::Session;
use clap::Args;
use serde::Serialize;

/// Show the binding that fires for an input
#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// Input code (e.g. KeyA, MouseLeft)
    pub input: String,

    /// Physical modifier key held while pressing the input (repeatable,
    /// e.g. --hold ShiftLeft --hold ControlRight)
    #[arg(long, value_name = "CODE")]
    pub hold: Vec<String>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// JSON response types
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedAction {
    id: String,
    name: String,
    color: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveResponse {
    input_code: String,
    raw_modifiers: ModifierCombination,
    effective_modifiers: ModifierCombination,
    display_name: Option<String>,
    action: Option<ResolvedAction>,
}

impl ResolveArgs {
    /// Execute the resolve command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        for code in &self.hold {
            if PhysicalModifier::from_code(code).is_none() {
                return Err(CliError::validation(format!(
                    "'{code}' is not a modifier key. Expected one of: {}",
                    PhysicalModifier::ALL
                        .iter()
                        .map(|m| m.code())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
            session.handle_event(&InputEvent::press(code.as_str()));
        }

        let input = self.input.trim();
        let entry = session.resolve(input);
        let response = ResolveResponse {
            input_code: input.to_string(),
            raw_modifiers: session.raw_combination(),
            effective_modifiers: session.effective_combination(),
            display_name: entry.map(|e| e.display_label()),
            action: session
                .action_for(input)
                .map(|(action, color)| ResolvedAction {
                    id: action.id.clone(),
                    name: action.name.clone(),
                    color: color.to_hex(),
                }),
        };

        if self.json {
            return print_json(&response);
        }

        match (&response.action, &response.display_name) {
            (Some(action), Some(label)) => println!(
                "{label} -> {} ({}) [{}]",
                action.name, action.id, action.color
            ),
            _ => println!(
                "{}:{} is not bound.",
                response.input_code,
                response.effective_modifiers.tag()
            ),
        }
        Ok(())
    }
}
