//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`vendor`] - In-memory [`SubscriptionGateway`](crate::port::SubscriptionGateway)
//!   and [`CreditResetter`](crate::port::CreditResetter) implementations.
//! - [`domain`] - Builders for subscriptions and reset-zone instants.

pub mod domain;
pub mod vendor;
