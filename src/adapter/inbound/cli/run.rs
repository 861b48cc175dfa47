//! Handler for the `run` command.

use crate::adapter::inbound::cli::command::{Cli, RunArgs};
use crate::adapter::inbound::cli::output;
use crate::application::reset::{ResetPlan, RunOutcome, RunReport, RunRequest};
use crate::domain::Stats;
use crate::error::Result;
use crate::infrastructure::bootstrap;

/// Execute the run command. Returns 1 when any reset failed.
pub async fn execute(cli: &Cli, args: &RunArgs) -> Result<i32> {
    let config = super::load_config(cli)?;
    config.init_logging();

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Token", config.token()?.masked());

    let service = bootstrap::build_service(&config)?;
    let report = service
        .run(RunRequest {
            strategy: args.strategy.forced(),
            dry_run: args.dry_run,
            now: None,
        })
        .await?;

    print_report(&report);
    Ok(report.exit_code())
}

fn print_report(report: &RunReport) {
    output::document("report", report);

    output::field("Time", report.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC+8"));
    output::field("Window", report.window);
    output::field(
        "Active",
        format!("{} / {}", report.active.len(), report.fetched),
    );
    if let Some(strategy) = report.strategy {
        output::field("Strategy", output::highlight(strategy));
    }

    match &report.outcome {
        RunOutcome::NoActiveSubscriptions => output::warning("No active subscriptions"),
        RunOutcome::DryRun { plan } => print_plan(plan),
        RunOutcome::Completed { stats, .. } => print_summary(stats),
    }
}

fn print_plan(plan: &ResetPlan) {
    output::section("Dry run");
    if plan.targets.is_empty() {
        output::note("No subscriptions would be reset");
    }
    for sub in &plan.targets {
        output::field(
            &format!("#{}", sub.id),
            format!(
                "would reset (resets used {}, credits {:.2} / {:.0})",
                sub.reset_count, sub.current_credits, sub.credit_limit
            ),
        );
    }
    for skipped in &plan.skipped {
        output::note(&format!(
            "#{} skipped: {}",
            skipped.subscription.id, skipped.reason
        ));
    }
}

fn print_summary(stats: &Stats) {
    output::section("Summary");
    output::field("Total", stats.total);
    output::field("Success", output::positive(stats.success));
    output::field("Failed", output::negative(stats.failed));

    if stats.failed == 0 && stats.success > 0 {
        output::success("All subscription credits reset");
    } else if stats.is_idle() {
        output::note("No subscriptions needed a reset");
    } else {
        output::warning(&format!(
            "{} subscription(s) failed to reset, check the logs",
            stats.failed
        ));
    }
}
