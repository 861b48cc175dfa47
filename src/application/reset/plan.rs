//! Reset planning: which subscriptions a strategy touches, and how.
//!
//! Planning is pure. It decides the targets and dispatch mode up front so the
//! executor only has to run calls, and so a dry run can show the exact plan.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{ActiveSubscription, ResetStrategy};

/// Usage rate at or below which a twice-reset subscription is reset again
/// during the conditional pass.
pub const DEFAULT_USAGE_THRESHOLD: f64 = 0.20;

/// How the targets of a plan are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dispatch {
    /// One call at a time, in input order, with a pause between calls.
    Sequential,
    /// Every target at once.
    Concurrent,
}

/// Reset-count bucket used by the conditional pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetBucket {
    Zero,
    One,
    Two,
    /// Any count above two; the vendor allows at most two scheduled resets
    /// per cycle, so these are anomalous.
    Other(u32),
}

impl ResetBucket {
    #[must_use]
    pub const fn of(reset_count: u32) -> Self {
        match reset_count {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::Two,
            n => Self::Other(n),
        }
    }
}

/// Why a subscription was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than two resets used; not eligible for the conditional pass.
    ResetCountNotDue { reset_count: u32 },
    /// Reset count outside the expected 0..=2 range.
    AnomalousResetCount { reset_count: u32 },
    /// Too many credits left to justify a reset.
    UsageAboveThreshold { usage_rate: f64 },
    /// Credit limit is zero, negative or not a number.
    InvalidCreditLimit,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResetCountNotDue { reset_count } => {
                write!(f, "only {reset_count} reset(s) used")
            }
            Self::AnomalousResetCount { reset_count } => {
                write!(f, "anomalous reset count {reset_count}")
            }
            Self::UsageAboveThreshold { usage_rate } => {
                write!(f, "{:.1}% of credits left", usage_rate * 100.0)
            }
            Self::InvalidCreditLimit => f.write_str("invalid credit limit"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSubscription {
    pub subscription: ActiveSubscription,
    #[serde(flatten)]
    pub reason: SkipReason,
}

/// Outcome of planning one strategy over a set of active subscriptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResetPlan {
    pub strategy: ResetStrategy,
    pub dispatch: Dispatch,
    /// Full input length. Becomes `Stats::total` whether or not every
    /// subscription is attempted.
    pub considered: usize,
    pub targets: Vec<ActiveSubscription>,
    pub skipped: Vec<SkippedSubscription>,
}

impl ResetPlan {
    /// Plan `strategy` over `subscriptions`.
    #[must_use]
    pub fn build(
        strategy: ResetStrategy,
        subscriptions: &[ActiveSubscription],
        usage_threshold: f64,
    ) -> Self {
        match strategy {
            ResetStrategy::Unconditional => Self::unconditional(subscriptions),
            ResetStrategy::Conditional => Self::conditional(subscriptions, usage_threshold),
        }
    }

    /// Every subscription, sequentially, in input order.
    #[must_use]
    pub fn unconditional(subscriptions: &[ActiveSubscription]) -> Self {
        Self {
            strategy: ResetStrategy::Unconditional,
            dispatch: Dispatch::Sequential,
            considered: subscriptions.len(),
            targets: subscriptions.to_vec(),
            skipped: Vec::new(),
        }
    }

    /// Only twice-reset subscriptions at or below the usage threshold,
    /// concurrently.
    #[must_use]
    pub fn conditional(subscriptions: &[ActiveSubscription], usage_threshold: f64) -> Self {
        let mut counts = [0usize; 3];
        let mut targets = Vec::new();
        let mut skipped = Vec::new();

        for sub in subscriptions {
            let bucket = ResetBucket::of(sub.reset_count);
            let reason = match bucket {
                ResetBucket::Zero | ResetBucket::One => {
                    counts[sub.reset_count as usize] += 1;
                    Some(SkipReason::ResetCountNotDue {
                        reset_count: sub.reset_count,
                    })
                }
                ResetBucket::Other(reset_count) => {
                    warn!(
                        subscription = %sub.id,
                        reset_count,
                        "Anomalous reset count, skipping"
                    );
                    Some(SkipReason::AnomalousResetCount { reset_count })
                }
                ResetBucket::Two => {
                    counts[2] += 1;
                    usage_skip_reason(sub, usage_threshold)
                }
            };

            match reason {
                Some(reason) => skipped.push(SkippedSubscription {
                    subscription: sub.clone(),
                    reason,
                }),
                None => targets.push(sub.clone()),
            }
        }

        info!(
            reset_0 = counts[0],
            reset_1 = counts[1],
            reset_2 = counts[2],
            selected = targets.len(),
            "Classified subscriptions by reset count"
        );

        Self {
            strategy: ResetStrategy::Conditional,
            dispatch: Dispatch::Concurrent,
            considered: subscriptions.len(),
            targets,
            skipped,
        }
    }

    /// True when the plan makes no reset calls.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// `None` when the subscription should be reset.
fn usage_skip_reason(sub: &ActiveSubscription, usage_threshold: f64) -> Option<SkipReason> {
    let Some(usage_rate) = sub.usage_rate() else {
        warn!(
            subscription = %sub.id,
            credit_limit = sub.credit_limit,
            "Invalid credit limit, skipping"
        );
        return Some(SkipReason::InvalidCreditLimit);
    };

    if usage_rate <= usage_threshold {
        info!(
            subscription = %sub.id,
            current_credits = sub.current_credits,
            credit_limit = sub.credit_limit,
            usage_pct = %format!("{:.1}", usage_rate * 100.0),
            "Subscription needs reset"
        );
        None
    } else {
        debug!(
            subscription = %sub.id,
            usage_pct = %format!("{:.1}", usage_rate * 100.0),
            "Usage above threshold, skipping"
        );
        Some(SkipReason::UsageAboveThreshold { usage_rate })
    }
}
