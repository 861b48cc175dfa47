//! Outbound adapters (driven side).

pub mod vendor;
