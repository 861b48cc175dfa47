//! Time-of-day strategy selection.
//!
//! The external scheduler fires at 18:30 and 23:45 in UTC+8. Which pass is
//! running is inferred from the hour in that fixed zone, never from the host
//! timezone, so the outcome is the same wherever the process runs.

use std::fmt;

use chrono::{DateTime, FixedOffset, Timelike, Utc};
use serde::Serialize;

/// Offset of the reset zone east of UTC, in seconds.
pub const RESET_ZONE_OFFSET_SECS: i32 = 8 * 3600;

/// The fixed civil zone (UTC+8) that reset windows are defined in.
#[must_use]
pub fn reset_zone() -> FixedOffset {
    FixedOffset::east_opt(RESET_ZONE_OFFSET_SECS).expect("UTC+8 is within the valid offset range")
}

/// Current wall-clock time in the reset zone. Read fresh on every call.
#[must_use]
pub fn now_in_reset_zone() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&reset_zone())
}

/// Reset algorithm chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetStrategy {
    /// 18:30 pass: only subscriptions with two resets used and at most 20%
    /// of their credits left, reset concurrently.
    Conditional,
    /// 23:45 pass (and manual runs): every active subscription, one at a time.
    Unconditional,
}

impl ResetStrategy {
    /// Stable name used in logs and command output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conditional => "conditional",
            Self::Unconditional => "unconditional",
        }
    }
}

impl fmt::Display for ResetStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scheduled window an invocation falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetWindow {
    /// 18:00-18:59.
    Evening,
    /// 23:00-00:59.
    Midnight,
    /// Any other hour; treated as a manual run.
    OutOfWindow,
}

impl ResetWindow {
    /// Classify an hour of day (0-23) in the reset zone.
    #[must_use]
    pub const fn from_hour(hour: u32) -> Self {
        match hour {
            18 => Self::Evening,
            23 | 0 => Self::Midnight,
            _ => Self::OutOfWindow,
        }
    }

    /// Window containing `now`, evaluated in the reset zone.
    #[must_use]
    pub fn at(now: &DateTime<FixedOffset>) -> Self {
        Self::from_hour(now.with_timezone(&reset_zone()).hour())
    }

    /// Strategy run in this window. Out-of-window runs reuse the
    /// unconditional pass.
    #[must_use]
    pub const fn strategy(self) -> ResetStrategy {
        match self {
            Self::Evening => ResetStrategy::Conditional,
            Self::Midnight | Self::OutOfWindow => ResetStrategy::Unconditional,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Evening => "18:00-18:59",
            Self::Midnight => "23:00-00:59",
            Self::OutOfWindow => "out of window",
        }
    }
}

impl fmt::Display for ResetWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick the reset strategy for the given instant.
#[must_use]
pub fn select_strategy(now: &DateTime<FixedOffset>) -> ResetStrategy {
    ResetWindow::at(now).strategy()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at_hour(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        reset_zone()
            .with_ymd_and_hms(2026, 3, 14, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn evening_hour_selects_conditional() {
        assert_eq!(select_strategy(&at_hour(18, 0)), ResetStrategy::Conditional);
        assert_eq!(select_strategy(&at_hour(18, 30)), ResetStrategy::Conditional);
        assert_eq!(select_strategy(&at_hour(18, 59)), ResetStrategy::Conditional);
    }

    #[test]
    fn midnight_hours_select_unconditional() {
        assert_eq!(select_strategy(&at_hour(23, 45)), ResetStrategy::Unconditional);
        assert_eq!(select_strategy(&at_hour(0, 10)), ResetStrategy::Unconditional);
        assert_eq!(ResetWindow::at(&at_hour(23, 45)), ResetWindow::Midnight);
        assert_eq!(ResetWindow::at(&at_hour(0, 59)), ResetWindow::Midnight);
    }

    #[test]
    fn other_hours_fall_back_to_unconditional() {
        assert_eq!(ResetWindow::at(&at_hour(10, 0)), ResetWindow::OutOfWindow);
        assert_eq!(select_strategy(&at_hour(10, 0)), ResetStrategy::Unconditional);
    }

    #[test]
    fn window_boundaries_are_exclusive_at_the_top() {
        assert_eq!(ResetWindow::at(&at_hour(19, 0)), ResetWindow::OutOfWindow);
        assert_eq!(ResetWindow::at(&at_hour(1, 0)), ResetWindow::OutOfWindow);
        assert_eq!(ResetWindow::at(&at_hour(17, 59)), ResetWindow::OutOfWindow);
        assert_eq!(ResetWindow::at(&at_hour(22, 59)), ResetWindow::OutOfWindow);
    }

    #[test]
    fn every_hour_maps_to_expected_window() {
        for hour in 0..24 {
            let expected = match hour {
                18 => ResetWindow::Evening,
                23 | 0 => ResetWindow::Midnight,
                _ => ResetWindow::OutOfWindow,
            };
            assert_eq!(ResetWindow::from_hour(hour), expected, "hour {hour}");
        }
    }

    #[test]
    fn instants_in_other_zones_are_converted_first() {
        // 10:30 UTC is 18:30 in UTC+8.
        let utc = Utc.with_ymd_and_hms(2026, 3, 14, 10, 30, 0).unwrap().fixed_offset();
        assert_eq!(select_strategy(&utc), ResetStrategy::Conditional);

        // 15:45 UTC is 23:45 in UTC+8, but hour 15 locally.
        let utc = Utc.with_ymd_and_hms(2026, 3, 14, 15, 45, 0).unwrap().fixed_offset();
        assert_eq!(ResetWindow::at(&utc), ResetWindow::Midnight);
    }

    #[test]
    fn now_is_reported_in_reset_zone() {
        assert_eq!(now_in_reset_zone().offset().local_minus_utc(), RESET_ZONE_OFFSET_SECS);
    }
}
