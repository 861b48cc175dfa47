//! Handler for the `list` command.

use crate::adapter::inbound::cli::command::Cli;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Fetch and print active subscriptions.
pub async fn execute(cli: &Cli) -> Result<i32> {
    let config = super::load_config(cli)?;
    config.init_logging();

    let service = bootstrap::build_service(&config)?;
    let listing = service.list_active().await?;

    output::document("subscriptions", &listing);
    output::section(&format!(
        "Active subscriptions ({} / {})",
        listing.active.len(),
        listing.fetched
    ));
    if listing.active.is_empty() {
        output::warning("No active subscriptions");
    }
    for sub in &listing.active {
        let usage = sub
            .usage_rate()
            .map_or_else(|| "n/a".to_string(), |rate| format!("{:.1}%", rate * 100.0));
        output::field(
            &format!("#{}", sub.id),
            format!(
                "resets used {}, credits {:.2} / {:.0} ({usage})",
                sub.reset_count, sub.current_credits, sub.credit_limit
            ),
        );
    }

    Ok(0)
}
