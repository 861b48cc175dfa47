//! CLI module graph and dispatch.

pub mod check;
pub mod command;
pub mod list;
pub mod output;
pub mod run;

pub use command::{Cli, Commands, RunArgs};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Dispatch the parsed command line. Returns the process exit code.
///
/// # Errors
///
/// Returns fatal errors (configuration, subscription fetch). Per-subscription
/// reset failures are reflected in the exit code instead.
pub async fn execute(cli: &Cli) -> Result<i32> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match &cli.command {
        None => run::execute(cli, &RunArgs::default()).await,
        Some(Commands::Run(args)) => run::execute(cli, args).await,
        Some(Commands::List) => list::execute(cli).await,
        Some(Commands::Check) => check::execute(cli),
    }
}

/// Load configuration and apply global CLI overrides.
pub(crate) fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(command::DEFAULT_CONFIG_PATH)?,
    };

    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.json_logs {
        config.logging.format = "json".to_string();
    }

    Ok(config)
}
