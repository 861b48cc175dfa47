//! Builders for domain primitives used across tests.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::domain::schedule::reset_zone;
use crate::domain::{ActiveSubscription, Subscription, SubscriptionId};

/// Raw subscription record.
pub fn subscription(
    id: i64,
    active: bool,
    reset_count: u32,
    current_credits: f64,
    credit_limit: f64,
) -> Subscription {
    Subscription {
        id: SubscriptionId::new(id),
        active,
        reset_count,
        current_credits,
        credit_limit,
    }
}

/// Active subscription projection.
pub fn active(
    id: i64,
    reset_count: u32,
    current_credits: f64,
    credit_limit: f64,
) -> ActiveSubscription {
    ActiveSubscription {
        id: SubscriptionId::new(id),
        reset_count,
        current_credits,
        credit_limit,
    }
}

/// A fixed date at `hour:minute` in the reset zone (UTC+8).
pub fn at_hour(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    reset_zone()
        .with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
        .single()
        .expect("fixed offsets have no ambiguous local times")
}
