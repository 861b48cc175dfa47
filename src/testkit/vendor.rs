//! In-memory vendor port implementations.
//!
//! - [`StaticGateway`] - Returns a fixed subscription list or a fixed API error.
//! - [`ScriptedResetter`] - Succeeds by default, fails for configured ids,
//!   records every call and tracks how many calls overlapped.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Subscription, SubscriptionId};
use crate::error::{FetchError, ResetError};
use crate::port::{CreditResetter, SubscriptionGateway};

/// Gateway returning a canned response.
#[derive(Debug)]
pub struct StaticGateway {
    response: Result<Vec<Subscription>, (i64, String)>,
    fetches: AtomicUsize,
}

impl StaticGateway {
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        Self {
            response: Ok(subscriptions),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails with [`FetchError::Api`].
    pub fn api_error(code: i64, msg: &str) -> Self {
        Self {
            response: Err((code, msg.to_string())),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriptionGateway for StaticGateway {
    async fn fetch_subscriptions(&self) -> Result<Vec<Subscription>, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(subscriptions) => Ok(subscriptions.clone()),
            Err((code, msg)) => Err(FetchError::Api {
                code: *code,
                msg: msg.clone(),
            }),
        }
    }
}

/// Resetter with scripted failures and call recording.
#[derive(Debug, Default)]
pub struct ScriptedResetter {
    failures: HashMap<SubscriptionId, ResetError>,
    latency: Duration,
    calls: Mutex<Vec<SubscriptionId>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedResetter {
    /// Every reset succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets for `ids` are rejected with HTTP 500; all others succeed.
    pub fn failing(ids: impl IntoIterator<Item = i64>) -> Self {
        ids.into_iter().fold(Self::new(), |resetter, id| {
            resetter.with_failure(
                id,
                ResetError::Rejected {
                    status: 500,
                    body: format!("{{\"msg\":\"reset {id} failed\"}}"),
                },
            )
        })
    }

    pub fn with_failure(mut self, id: i64, error: ResetError) -> Self {
        self.failures.insert(SubscriptionId::new(id), error);
        self
    }

    /// Hold each call open for `latency` before answering.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Ids in the order calls started.
    pub fn calls(&self) -> Vec<SubscriptionId> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Highest number of calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CreditResetter for ScriptedResetter {
    async fn reset_credits(&self, id: SubscriptionId) -> Result<(), ResetError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        self.calls.lock().push(id);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.failures.get(&id) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
