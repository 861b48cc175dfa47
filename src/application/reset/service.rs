//! Reset run orchestration.
//!
//! fetch → filter → (stop when nothing is active) → select strategy → plan →
//! (stop on dry run) → execute → report.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use super::executor::ResetExecutor;
use super::plan::{ResetPlan, DEFAULT_USAGE_THRESHOLD};
use crate::domain::schedule::{now_in_reset_zone, reset_zone};
use crate::domain::{filter_active, ActiveSubscription, ResetStrategy, ResetWindow, Stats};
use crate::error::Result;
use crate::port::SubscriptionGateway;

/// Parameters for one run.
#[derive(Debug, Clone, Default)]
pub struct RunRequest {
    /// Force a strategy instead of deriving it from the time of day.
    pub strategy: Option<ResetStrategy>,
    /// Plan only; make no reset calls.
    pub dry_run: bool,
    /// Evaluate the schedule at this instant instead of the system clock.
    pub now: Option<DateTime<FixedOffset>>,
}

/// How a run ended.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// The vendor reported no active subscriptions.
    NoActiveSubscriptions,
    /// Planned but not executed.
    DryRun { plan: ResetPlan },
    /// Plan executed.
    Completed { plan: ResetPlan, stats: Stats },
}

/// Summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    /// Schedule evaluation instant, in the reset zone.
    pub evaluated_at: DateTime<FixedOffset>,
    pub window: ResetWindow,
    /// Raw subscriptions returned by the vendor.
    pub fetched: usize,
    pub active: Vec<ActiveSubscription>,
    pub strategy: Option<ResetStrategy>,
    pub outcome: RunOutcome,
}

impl RunReport {
    /// Final counters; zeroed when nothing ran.
    #[must_use]
    pub fn stats(&self) -> Stats {
        match &self.outcome {
            RunOutcome::Completed { stats, .. } => *stats,
            RunOutcome::DryRun { plan } => Stats::new(plan.considered),
            RunOutcome::NoActiveSubscriptions => Stats::default(),
        }
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.stats().has_failures()
    }

    /// Process exit status: 1 iff any reset failed.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

/// Result of listing subscriptions without resetting.
#[derive(Debug, Clone, Serialize)]
pub struct ActiveListing {
    pub fetched: usize,
    pub active: Vec<ActiveSubscription>,
}

/// Drives a complete reset run.
pub struct ResetService {
    gateway: Arc<dyn SubscriptionGateway>,
    executor: ResetExecutor,
    usage_threshold: f64,
}

impl ResetService {
    #[must_use]
    pub fn new(gateway: Arc<dyn SubscriptionGateway>, executor: ResetExecutor) -> Self {
        Self {
            gateway,
            executor,
            usage_threshold: DEFAULT_USAGE_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_usage_threshold(mut self, threshold: f64) -> Self {
        self.usage_threshold = threshold;
        self
    }

    /// Fetch and filter subscriptions without resetting anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription fetch fails.
    pub async fn list_active(&self) -> Result<ActiveListing> {
        let raw = self.gateway.fetch_subscriptions().await?;
        let active = filter_active(&raw);
        info!(active = active.len(), fetched = raw.len(), "Active subscriptions");
        Ok(ActiveListing {
            fetched: raw.len(),
            active,
        })
    }

    /// Execute one reset run.
    ///
    /// # Errors
    ///
    /// Returns an error if the subscription fetch fails. Individual reset
    /// failures are reported in the returned stats instead.
    pub async fn run(&self, request: RunRequest) -> Result<RunReport> {
        let run_id = Uuid::new_v4();
        let span = info_span!("reset_run", run_id = %run_id);
        self.run_inner(run_id, request).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, request: RunRequest) -> Result<RunReport> {
        info!(dry_run = request.dry_run, "Starting credit reset");

        let listing = self.list_active().await?;
        for sub in &listing.active {
            info!(
                subscription = %sub.id,
                reset_count = sub.reset_count,
                current_credits = sub.current_credits,
                credit_limit = sub.credit_limit,
                "Active subscription"
            );
        }

        let evaluated_at = request
            .now
            .unwrap_or_else(now_in_reset_zone)
            .with_timezone(&reset_zone());
        let window = ResetWindow::at(&evaluated_at);

        let mut report = RunReport {
            run_id,
            evaluated_at,
            window,
            fetched: listing.fetched,
            active: listing.active,
            strategy: None,
            outcome: RunOutcome::NoActiveSubscriptions,
        };

        if report.active.is_empty() {
            warn!("No active subscriptions");
            return Ok(report);
        }

        let strategy = match request.strategy {
            Some(strategy) => {
                info!(strategy = %strategy, "Strategy forced by request");
                strategy
            }
            None => {
                let strategy = window.strategy();
                if window == ResetWindow::OutOfWindow {
                    warn!(
                        time = %evaluated_at.format("%H:%M:%S"),
                        "Outside scheduled reset windows, treating as manual run"
                    );
                }
                info!(
                    time = %evaluated_at.format("%Y-%m-%d %H:%M:%S"),
                    window = %window,
                    strategy = %strategy,
                    "Selected reset strategy"
                );
                strategy
            }
        };
        report.strategy = Some(strategy);

        let plan = ResetPlan::build(strategy, &report.active, self.usage_threshold);

        if request.dry_run {
            info!(targets = plan.targets.len(), "Dry run, skipping reset calls");
            report.outcome = RunOutcome::DryRun { plan };
            return Ok(report);
        }

        let stats = self.executor.execute(&plan).await;
        info!(
            total = stats.total,
            success = stats.success,
            failed = stats.failed,
            "Reset finished"
        );
        report.outcome = RunOutcome::Completed { plan, stats };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::{at_hour, subscription};
    use crate::testkit::vendor::{ScriptedResetter, StaticGateway};
    use std::time::Duration;

    fn service(gateway: StaticGateway, resetter: &Arc<ScriptedResetter>) -> ResetService {
        let executor = ResetExecutor::new(resetter.clone()).with_request_delay(Duration::ZERO);
        ResetService::new(Arc::new(gateway), executor)
    }

    #[tokio::test]
    async fn evening_run_uses_conditional_plan() {
        let resetter = Arc::new(ScriptedResetter::new());
        let gateway = StaticGateway::new(vec![
            subscription(1, true, 2, 10.0, 100.0),
            subscription(2, true, 1, 0.0, 100.0),
            subscription(3, false, 2, 0.0, 100.0),
        ]);
        let report = service(gateway, &resetter)
            .run(RunRequest {
                now: Some(at_hour(18, 30)),
                ..RunRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(report.window, ResetWindow::Evening);
        assert_eq!(report.strategy, Some(ResetStrategy::Conditional));
        assert_eq!(report.fetched, 3);
        assert_eq!(report.active.len(), 2);
        assert_eq!(
            report.stats(),
            Stats {
                total: 2,
                success: 1,
                failed: 0
            }
        );
        assert_eq!(resetter.call_count(), 1);
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn forced_strategy_overrides_clock() {
        let resetter = Arc::new(ScriptedResetter::new());
        let gateway = StaticGateway::new(vec![subscription(1, true, 0, 90.0, 100.0)]);
        let report = service(gateway, &resetter)
            .run(RunRequest {
                strategy: Some(ResetStrategy::Unconditional),
                now: Some(at_hour(18, 30)),
                ..RunRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(report.strategy, Some(ResetStrategy::Unconditional));
        assert_eq!(resetter.call_count(), 1);
    }

    #[tokio::test]
    async fn dry_run_makes_no_calls() {
        let resetter = Arc::new(ScriptedResetter::new());
        let gateway = StaticGateway::new(vec![
            subscription(1, true, 0, 90.0, 100.0),
            subscription(2, true, 2, 5.0, 100.0),
        ]);
        let report = service(gateway, &resetter)
            .run(RunRequest {
                dry_run: true,
                now: Some(at_hour(23, 45)),
                ..RunRequest::default()
            })
            .await
            .unwrap();

        assert_eq!(resetter.call_count(), 0);
        match &report.outcome {
            RunOutcome::DryRun { plan } => assert_eq!(plan.targets.len(), 2),
            other => panic!("expected dry run, got {other:?}"),
        }
        assert_eq!(report.exit_code(), 0);
    }

    #[tokio::test]
    async fn fetch_failure_is_fatal() {
        let resetter = Arc::new(ScriptedResetter::new());
        let gateway = StaticGateway::api_error(500, "internal");
        let result = service(gateway, &resetter).run(RunRequest::default()).await;

        assert!(result.is_err());
        assert_eq!(resetter.call_count(), 0);
    }

    #[tokio::test]
    async fn list_active_filters_without_resetting() {
        let resetter = Arc::new(ScriptedResetter::new());
        let gateway = StaticGateway::new(vec![
            subscription(1, false, 0, 0.0, 100.0),
            subscription(2, true, 0, 0.0, 100.0),
        ]);
        let listing = service(gateway, &resetter).list_active().await.unwrap();

        assert_eq!(listing.fetched, 2);
        assert_eq!(listing.active.len(), 1);
        assert_eq!(resetter.call_count(), 0);
    }
}
