//! Command-line interface definitions.
//!
//! Defines the CLI structure for creditreset using `clap`. Running the binary
//! without a subcommand performs a reset run, which is what the scheduler
//! invokes.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::ResetStrategy;

/// Config file consulted when `--config` is not given. Built-in defaults
/// apply if it does not exist.
pub const DEFAULT_CONFIG_PATH: &str = "creditreset.toml";

/// Scheduled credit reset for vendor subscriptions
#[derive(Parser, Debug)]
#[command(name = "creditreset")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Reset credits according to the current time window (default)
    Run(RunArgs),

    /// List active subscriptions without resetting
    List,

    /// Validate configuration and show the strategy that would run now
    Check,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Strategy to run; `auto` picks one from the time of day in UTC+8
    #[arg(long, value_enum, default_value_t = StrategyChoice::Auto)]
    pub strategy: StrategyChoice,

    /// Show what would be reset without calling the reset endpoint
    #[arg(long)]
    pub dry_run: bool,
}

/// Strategy selection on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Derive from the current time
    #[default]
    Auto,
    /// 18:30 pass: twice-reset subscriptions at or below the usage threshold
    Conditional,
    /// 23:45 pass: every active subscription
    Unconditional,
}

impl StrategyChoice {
    /// Forced strategy, or `None` for time-based selection.
    #[must_use]
    pub const fn forced(self) -> Option<ResetStrategy> {
        match self {
            Self::Auto => None,
            Self::Conditional => Some(ResetStrategy::Conditional),
            Self::Unconditional => Some(ResetStrategy::Unconditional),
        }
    }
}
