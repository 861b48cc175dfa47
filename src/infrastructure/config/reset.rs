//! Reset execution configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::reset::plan::DEFAULT_USAGE_THRESHOLD;

/// Tuning for the reset strategies.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetConfig {
    /// Pause between consecutive sequential resets, in milliseconds
    /// (default: 1000). Not applied after the last call.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,
    /// Inclusive usage-rate threshold for the conditional pass (default: 0.20).
    #[serde(default = "default_usage_threshold")]
    pub usage_threshold: f64,
    /// Cap on in-flight resets during the conditional pass. Unset means every
    /// selected subscription is dispatched at once.
    #[serde(default)]
    pub max_concurrency: Option<usize>,
}

const fn default_request_delay_ms() -> u64 {
    1000
}

const fn default_usage_threshold() -> f64 {
    DEFAULT_USAGE_THRESHOLD
}

impl ResetConfig {
    #[must_use]
    pub const fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for ResetConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: default_request_delay_ms(),
            usage_threshold: default_usage_threshold(),
            max_concurrency: None,
        }
    }
}
