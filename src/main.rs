//! KBM Layout - keyboard and mouse action binding engine
//!
//! Headless command line front end: manage keybind sets, color groups,
//! actions and bindings, and resolve which action an input fires.

use clap::{Parser, Subcommand};
use kbm_layout::cli::common::open_session;
use kbm_layout::cli::{
    ActionArgs, BindArgs, CliError, CliResult, ExitCode, GroupArgs, ResetArgs, ResolveArgs,
    SetArgs,
};
use kbm_layout::config::Config;
use kbm_layout::constants::APP_NAME;
use kbm_layout::logging;
use std::path::PathBuf;
use tracing::debug;

/// KBM Layout - bind keyboard keys and mouse buttons to actions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding keybind-set data (overrides the config file)
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Path to config.toml (default: platform config directory)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage keybind sets
    Set(SetArgs),
    /// Manage color groups of the active set
    Group(GroupArgs),
    /// Manage actions of the active set
    Action(ActionArgs),
    /// Manage bindings of the active set
    Bind(BindArgs),
    /// Show which action an input fires
    Resolve(ResolveArgs),
    /// Delete all data and start over
    Reset(ResetArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::Success.into(),
        Err(e) => {
            eprintln!("Error: {e}");
            e.kind.into()
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

    logging::init(&config.logging.level, cli.verbose);
    debug!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));

    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config
            .data_dir()
            .map_err(|e| CliError::io(format!("Failed to resolve data directory: {e:#}")))?,
    };
    debug!("Using data directory {}", data_dir.display());

    let mut session = open_session(&data_dir)?;
    match &cli.command {
        Commands::Set(args) => args.execute(&mut session),
        Commands::Group(args) => args.execute(&mut session),
        Commands::Action(args) => args.execute(&mut session),
        Commands::Bind(args) => args.execute(&mut session),
        Commands::Resolve(args) => args.execute(&mut session),
        Commands::Reset(args) => args.execute(&mut session),
    }
}
