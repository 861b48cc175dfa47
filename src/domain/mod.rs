//! Vendor-agnostic domain types.
//!
//! - [`subscription`] - Raw records and the active projection
//! - [`schedule`] - Reset windows and strategy selection in UTC+8
//! - [`stats`] - Per-run reset counters

pub mod id;
pub mod schedule;
pub mod stats;
pub mod subscription;

pub use id::SubscriptionId;
pub use schedule::{select_strategy, ResetStrategy, ResetWindow};
pub use stats::{ResetOutcome, SharedStats, Stats};
pub use subscription::{filter_active, ActiveSubscription, Subscription};
