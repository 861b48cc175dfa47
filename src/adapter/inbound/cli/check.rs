//! Handler for the `check` command. Makes no network calls.

use serde_json::json;

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::output;
use crate::domain::schedule::now_in_reset_zone;
use crate::domain::ResetWindow;
use crate::error::Result;

/// Validate configuration and report the strategy `run` would pick now.
pub fn execute(cli: &Cli) -> Result<i32> {
    let config = super::load_config(cli)?;
    let token = config.token()?;

    let now = now_in_reset_zone();
    let window = ResetWindow::at(&now);
    let strategy = window.strategy();

    output::document(
        "check",
        &json!({
            "token": token.masked(),
            "subscriptions_url": config.vendor.subscriptions_url,
            "reset_url": config.vendor.reset_url,
            "timeout_secs": config.vendor.timeout_secs,
            "request_delay_ms": config.reset.request_delay_ms,
            "usage_threshold": config.reset.usage_threshold,
            "max_concurrency": config.reset.max_concurrency,
            "now": now.to_rfc3339(),
            "window": window,
            "strategy": strategy,
        }),
    );

    output::section("Configuration");
    output::field("Token", token.masked());
    output::field("Listing", &config.vendor.subscriptions_url);
    output::field("Reset", &config.vendor.reset_url);
    output::field("Timeout", format!("{}s", config.vendor.timeout_secs));
    output::field("Delay", format!("{}ms", config.reset.request_delay_ms));
    output::field(
        "Threshold",
        format!("{:.0}%", config.reset.usage_threshold * 100.0),
    );
    output::field(
        "Concurrency",
        config
            .reset
            .max_concurrency
            .map_or_else(|| "unbounded".to_string(), |n| n.to_string()),
    );

    output::section("Schedule");
    output::field("Now", now.format("%Y-%m-%d %H:%M:%S UTC+8"));
    output::field("Window", window);
    output::field("Strategy", output::highlight(strategy));
    if window == ResetWindow::OutOfWindow {
        output::note("Outside scheduled windows; a run now is treated as manual");
    }
    output::success("Configuration is valid");

    Ok(0)
}
