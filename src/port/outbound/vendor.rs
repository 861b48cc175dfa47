//! Vendor API ports.

use async_trait::async_trait;

use crate::domain::{Subscription, SubscriptionId};
use crate::error::{FetchError, ResetError};

/// Source of the raw subscription snapshot for a run.
#[async_trait]
pub trait SubscriptionGateway: Send + Sync {
    /// Fetch every subscription visible to the configured token.
    async fn fetch_subscriptions(&self) -> Result<Vec<Subscription>, FetchError>;
}

/// Single-subscription reset primitive.
///
/// Each call issues exactly one reset request. The vendor counts every
/// successful call, so callers must not invoke it twice for the same
/// subscription within one pass.
#[async_trait]
pub trait CreditResetter: Send + Sync {
    async fn reset_credits(&self, id: SubscriptionId) -> Result<(), ResetError>;
}
