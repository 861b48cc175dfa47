//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!            ┌─────────────────────────┐
//!            │      Application        │
//!            │   (plan / executor /    │
//!            │        service)         │
//!            └───────────┬─────────────┘
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!  ┌───────────────────┐      ┌─────────────────┐
//!  │SubscriptionGateway│      │ CreditResetter  │
//!  └───────────────────┘      └─────────────────┘
//!          ▲                           ▲
//!          └──────── VendorClient ─────┘
//! ```

pub mod outbound;

pub use outbound::vendor::{CreditResetter, SubscriptionGateway};
