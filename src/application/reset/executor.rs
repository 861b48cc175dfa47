//! Reset execution.
//!
//! Runs a [`ResetPlan`] against the single-subscription reset primitive and
//! folds every outcome into a fresh [`Stats`] value:
//!
//! - **Sequential** - input order, one call at a time, fixed pause between
//!   consecutive calls (none after the last). Used by the unconditional pass.
//! - **Concurrent** - one spawned task per target, all dispatched at once.
//!   Used by the conditional pass. Counters are shared under a mutex.
//!
//! Failures are never retried and never stop the batch.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{error, info, warn, Instrument, Span};

use super::plan::{Dispatch, ResetPlan};
use crate::domain::{ActiveSubscription, ResetOutcome, ResetStrategy, SharedStats, Stats};
use crate::error::ResetError;
use crate::port::CreditResetter;

/// Default pause between sequential reset calls.
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Executes reset plans against a [`CreditResetter`].
#[derive(Clone)]
pub struct ResetExecutor {
    resetter: Arc<dyn CreditResetter>,
    request_delay: Duration,
    max_concurrency: Option<usize>,
}

impl ResetExecutor {
    #[must_use]
    pub fn new(resetter: Arc<dyn CreditResetter>) -> Self {
        Self {
            resetter,
            request_delay: DEFAULT_REQUEST_DELAY,
            max_concurrency: None,
        }
    }

    /// Set the pause between sequential calls.
    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// Cap in-flight calls during concurrent dispatch. `None` is unbounded.
    #[must_use]
    pub fn with_max_concurrency(mut self, max: Option<usize>) -> Self {
        self.max_concurrency = max.filter(|&n| n > 0);
        self
    }

    /// Plan and execute `strategy` over `subscriptions`.
    pub async fn run_strategy(
        &self,
        strategy: ResetStrategy,
        subscriptions: &[ActiveSubscription],
        usage_threshold: f64,
    ) -> Stats {
        let plan = ResetPlan::build(strategy, subscriptions, usage_threshold);
        self.execute(&plan).await
    }

    /// Execute a prepared plan. `total` is always the plan's `considered`.
    pub async fn execute(&self, plan: &ResetPlan) -> Stats {
        info!(
            strategy = %plan.strategy,
            considered = plan.considered,
            targets = plan.targets.len(),
            "Executing reset plan"
        );
        match plan.dispatch {
            Dispatch::Sequential => self.run_sequential(&plan.targets, plan.considered).await,
            Dispatch::Concurrent => self.reset_concurrent(&plan.targets, plan.considered).await,
        }
    }

    /// Reset every subscription in order, one at a time.
    pub async fn reset_sequential(&self, subscriptions: &[ActiveSubscription]) -> Stats {
        self.run_sequential(subscriptions, subscriptions.len()).await
    }

    async fn run_sequential(&self, subscriptions: &[ActiveSubscription], total: usize) -> Stats {
        let mut stats = Stats::new(total);
        let count = subscriptions.len();

        for (index, sub) in subscriptions.iter().enumerate() {
            info!(
                progress = %format!("{}/{}", index + 1, count),
                subscription = %sub.id,
                reset_count = sub.reset_count,
                current_credits = sub.current_credits,
                credit_limit = sub.credit_limit,
                "Resetting subscription"
            );
            let outcome = reset_one(self.resetter.as_ref(), sub).await;
            stats.record(&outcome);

            if index + 1 < count && !self.request_delay.is_zero() {
                sleep(self.request_delay).await;
            }
        }

        stats
    }

    /// Reset every subscription concurrently, one task each.
    ///
    /// `total` is reported as-is; with no subscriptions nothing is called and
    /// the returned stats carry `total` with zero successes and failures.
    pub async fn reset_concurrent(
        &self,
        subscriptions: &[ActiveSubscription],
        total: usize,
    ) -> Stats {
        let stats = SharedStats::new(total);
        if subscriptions.is_empty() {
            info!("No subscriptions need reset");
            return stats.into_stats();
        }

        info!(count = subscriptions.len(), "Dispatching concurrent resets");
        let semaphore = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        let handles: Vec<_> = subscriptions
            .iter()
            .map(|sub| {
                let resetter = Arc::clone(&self.resetter);
                let stats = stats.clone();
                let semaphore = semaphore.clone();
                let sub = sub.clone();
                tokio::spawn(
                    async move {
                        let _permit = match semaphore {
                            Some(semaphore) => semaphore.acquire_owned().await.ok(),
                            None => None,
                        };
                        let outcome = reset_one(resetter.as_ref(), &sub).await;
                        stats.record(&outcome);
                    }
                    .instrument(Span::current()),
                )
            })
            .collect();

        for (sub, joined) in subscriptions.iter().zip(join_all(handles).await) {
            if let Err(err) = joined {
                // The worker died before recording; count it so every target
                // still yields exactly one outcome.
                error!(subscription = %sub.id, error = %err, "Reset worker aborted");
                stats.record(&ResetOutcome::Failure(ResetError::Worker(err.to_string())));
            }
        }

        stats.into_stats()
    }
}

async fn reset_one(resetter: &dyn CreditResetter, sub: &ActiveSubscription) -> ResetOutcome {
    let outcome = ResetOutcome::from(resetter.reset_credits(sub.id).await);
    match &outcome {
        ResetOutcome::Success => info!(subscription = %sub.id, "Reset succeeded"),
        ResetOutcome::Failure(err) => warn!(subscription = %sub.id, error = %err, "Reset failed"),
    }
    outcome
}
