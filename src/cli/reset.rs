//! Reset command: wipe stored data back to a single default set.

use crate::cli::common::{CliError, CliResult};
use crate::services::Session;
use clap::Args;

/// Delete every keybind set and start over with the default one
#[derive(Debug, Clone, Args)]
pub struct ResetArgs {
    /// Confirm the reset
    #[arg(long)]
    pub force: bool,
}

impl ResetArgs {
    /// Execute the reset command
    pub fn execute(&self, session: &mut Session) -> CliResult<()> {
        if !self.force {
            return Err(CliError::validation(
                "Reset deletes every keybind set. Pass --force to confirm.",
            ));
        }
        session.reset();
        println!("All keybind sets deleted. Started over with the default set.");
        Ok(())
    }
}
