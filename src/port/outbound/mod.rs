//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! The only infrastructure dependency is the vendor API, split into the
//! read side (subscription listing) and the write side (credit reset).

pub mod vendor;
