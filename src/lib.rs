//! Creditreset - Scheduled credit reset for vendor subscriptions.
//!
//! A single-shot batch: fetch the account's subscriptions, keep the active
//! ones, pick a strategy from the time of day in UTC+8 and reset credits
//! through the vendor's HTTP API.
//!
//! # Strategies
//!
//! - **Unconditional** (23:45 window) - reset every active subscription, one
//!   at a time, with a pause between calls.
//! - **Conditional** (18:30 window) - reset only subscriptions that already
//!   used two resets and have at most 20% of their credits left, all at once.
//!
//! # Modules
//!
//! - [`domain`] - Subscriptions, schedule windows, reset counters
//! - [`port`] - Vendor-facing traits
//! - [`application`] - Planning, execution and the run use case
//! - [`adapter`] - Vendor HTTP client and the CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use creditreset::infrastructure::bootstrap::build_service;
//! use creditreset::infrastructure::config::settings::Config;
//! use creditreset::application::reset::RunRequest;
//!
//! # async fn run() -> creditreset::error::Result<()> {
//! let config = Config::load_or_default("creditreset.toml")?;
//! let report = build_service(&config)?.run(RunRequest::default()).await?;
//! std::process::exit(report.exit_code());
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
