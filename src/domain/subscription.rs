//! Subscription records and the active-subscription projection.
//!
//! The vendor returns a full snapshot of every subscription on each run.
//! Reset logic only ever looks at the active ones, reduced to the four
//! fields it needs.

use serde::Serialize;

use super::id::SubscriptionId;

/// Raw subscription record as fetched from the vendor.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub active: bool,
    /// Scheduled resets already applied in the current cycle.
    pub reset_count: u32,
    pub current_credits: f64,
    /// Credit cap from the subscription's plan.
    pub credit_limit: f64,
}

/// Read-only projection of an active [`Subscription`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveSubscription {
    pub id: SubscriptionId,
    pub reset_count: u32,
    pub current_credits: f64,
    pub credit_limit: f64,
}

impl ActiveSubscription {
    /// Current credits divided by the credit limit.
    ///
    /// Returns `None` when the limit is not a positive finite number, since
    /// no meaningful rate exists then.
    #[must_use]
    pub fn usage_rate(&self) -> Option<f64> {
        if self.credit_limit.is_finite() && self.credit_limit > 0.0 {
            Some(self.current_credits / self.credit_limit)
        } else {
            None
        }
    }
}

impl From<&Subscription> for ActiveSubscription {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: sub.id,
            reset_count: sub.reset_count,
            current_credits: sub.current_credits,
            credit_limit: sub.credit_limit,
        }
    }
}

impl From<&ActiveSubscription> for Subscription {
    fn from(sub: &ActiveSubscription) -> Self {
        Self {
            id: sub.id,
            active: true,
            reset_count: sub.reset_count,
            current_credits: sub.current_credits,
            credit_limit: sub.credit_limit,
        }
    }
}

/// Keep only active subscriptions, in their original order.
#[must_use]
pub fn filter_active(raw: &[Subscription]) -> Vec<ActiveSubscription> {
    raw.iter()
        .filter(|sub| sub.active)
        .map(ActiveSubscription::from)
        .collect()
}
