//! Credit reset use case.
//!
//! - [`plan`] - Strategy planning (targets, skips, dispatch mode)
//! - [`executor`] - Sequential and concurrent execution into [`Stats`](crate::domain::Stats)
//! - [`service`] - End-to-end run: fetch, filter, select, execute, report

pub mod executor;
pub mod plan;
pub mod service;

pub use executor::ResetExecutor;
pub use plan::{Dispatch, ResetBucket, ResetPlan, SkipReason, SkippedSubscription};
pub use service::{ActiveListing, ResetService, RunOutcome, RunReport, RunRequest};
