//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (command-line interface)
//! - [`outbound`] - Driven adapters (vendor HTTP API)

pub mod inbound;
pub mod outbound;
