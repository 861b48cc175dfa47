//! Reset statistics.
//!
//! Each strategy invocation builds its own aggregate and returns it by value.
//! Concurrent workers share it through [`SharedStats`].

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::error::ResetError;

/// Result of one reset attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    Success,
    Failure(ResetError),
}

impl ResetOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Result<(), ResetError>> for ResetOutcome {
    fn from(result: Result<(), ResetError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(err) => Self::Failure(err),
        }
    }
}

/// Counts for one strategy execution.
///
/// `total` is the number of subscriptions the strategy considered, which
/// can exceed the number it actually attempted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
}

impl Stats {
    #[must_use]
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            success: 0,
            failed: 0,
        }
    }

    /// Fold one outcome into the counters.
    pub fn record(&mut self, outcome: &ResetOutcome) {
        match outcome {
            ResetOutcome::Success => self.success += 1,
            ResetOutcome::Failure(_) => self.failed += 1,
        }
    }

    /// Number of reset attempts recorded so far.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.success + self.failed
    }

    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// True when nothing was attempted.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.attempted() == 0
    }
}

/// Mutex-guarded [`Stats`] shared by concurrent reset workers.
#[derive(Debug, Clone, Default)]
pub struct SharedStats {
    inner: Arc<Mutex<Stats>>,
}

impl SharedStats {
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Stats::new(total))),
        }
    }

    pub fn record(&self, outcome: &ResetOutcome) {
        self.inner.lock().record(outcome);
    }

    /// Copy of the current counters.
    #[must_use]
    pub fn snapshot(&self) -> Stats {
        *self.inner.lock()
    }

    /// Final counters once every worker has finished.
    #[must_use]
    pub fn into_stats(self) -> Stats {
        self.snapshot()
    }
}
