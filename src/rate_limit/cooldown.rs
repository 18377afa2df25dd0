//! Per-provider quota cooldown.
//!
//! A provider is either available or cooling down until some instant. The
//! only way in is a quota-classified failure; the way out is implicit, every
//! check compares the clock against the stored deadline. State lives in
//! atomics so concurrent requests never take a lock. Racing failures simply
//! overwrite the deadline (last write wins).

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clock::Clock;

/// Default suppression window after a quota error (15 minutes).
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15 * 60);

/// Sentinel for "no cooldown ever recorded".
const NO_DEADLINE: i64 = i64::MIN;

/// Logical state of a provider at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownState {
    Available,
    CoolingDown { until: DateTime<Utc> },
}

/// Serializable view of a tracker for status reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CooldownStatus {
    pub available: bool,
    pub cooldown_until: Option<DateTime<Utc>>,
    pub quota_exceeded: bool,
}

/// Timed suppression state for one provider.
pub struct CooldownTracker {
    window: Duration,
    clock: Arc<dyn Clock>,
    cooldown_until_ms: AtomicI64,
    quota_exceeded: AtomicBool,
}

impl CooldownTracker {
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            window,
            clock,
            cooldown_until_ms: AtomicI64::new(NO_DEADLINE),
            quota_exceeded: AtomicBool::new(false),
        }
    }

    /// Current state according to the injected clock.
    pub fn state(&self) -> CooldownState {
        let until_ms = self.cooldown_until_ms.load(Ordering::Acquire);
        if until_ms == NO_DEADLINE {
            return CooldownState::Available;
        }
        if self.clock.now().timestamp_millis() < until_ms {
            match DateTime::from_timestamp_millis(until_ms) {
                Some(until) => CooldownState::CoolingDown { until },
                None => CooldownState::Available,
            }
        } else {
            CooldownState::Available
        }
    }

    /// Pre-call gate. Returns the deadline when the provider must be skipped,
    /// re-flagging the quota condition for this cycle.
    pub fn check(&self) -> Option<DateTime<Utc>> {
        match self.state() {
            CooldownState::Available => None,
            CooldownState::CoolingDown { until } => {
                self.quota_exceeded.store(true, Ordering::Release);
                Some(until)
            }
        }
    }

    /// Record a quota failure: flag it and suppress for a full window from now.
    pub fn record_quota_failure(&self) -> DateTime<Utc> {
        let now = self.clock.now();
        let window_ms = i64::try_from(self.window.as_millis()).unwrap_or(i64::MAX);
        let until_ms = now
            .timestamp_millis()
            .saturating_add(window_ms)
            .min(DateTime::<Utc>::MAX_UTC.timestamp_millis());
        self.quota_exceeded.store(true, Ordering::Release);
        self.cooldown_until_ms.store(until_ms, Ordering::Release);
        DateTime::from_timestamp_millis(until_ms).unwrap_or(now)
    }

    /// Whether a quota failure has ever been seen for this provider.
    pub fn quota_exceeded_flagged(&self) -> bool {
        self.quota_exceeded.load(Ordering::Acquire)
    }

    pub fn status(&self) -> CooldownStatus {
        let state = self.state();
        CooldownStatus {
            available: state == CooldownState::Available,
            cooldown_until: match state {
                CooldownState::CoolingDown { until } => Some(until),
                CooldownState::Available => None,
            },
            quota_exceeded: self.quota_exceeded_flagged(),
        }
    }
}

impl std::fmt::Debug for CooldownTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CooldownTracker")
            .field("window", &self.window)
            .field("state", &self.state())
            .field("quota_exceeded", &self.quota_exceeded_flagged())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate_limit::ManualClock;

    fn tracker() -> (Arc<ManualClock>, CooldownTracker) {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let tracker = CooldownTracker::new(DEFAULT_COOLDOWN, clock.clone());
        (clock, tracker)
    }

    #[test]
    fn test_starts_available() {
        let (_clock, tracker) = tracker();
        assert_eq!(tracker.state(), CooldownState::Available);
        assert!(tracker.check().is_none());
        assert!(!tracker.quota_exceeded_flagged());
    }

    #[test]
    fn test_quota_failure_sets_fifteen_minute_window() {
        let (clock, tracker) = tracker();
        let start = clock.now();
        let until = tracker.record_quota_failure();

        assert_eq!((until - start).num_minutes(), 15);
        assert!(tracker.quota_exceeded_flagged());
        assert_eq!(tracker.check(), Some(until));
    }

    #[test]
    fn test_becomes_available_after_window() {
        let (clock, tracker) = tracker();
        tracker.record_quota_failure();

        clock.advance(Duration::from_secs(14 * 60 + 59));
        assert!(matches!(tracker.state(), CooldownState::CoolingDown { .. }));

        clock.advance(Duration::from_secs(1));
        assert_eq!(tracker.state(), CooldownState::Available);
        // The flag is sticky; only the window expires.
        assert!(tracker.quota_exceeded_flagged());
    }

    #[test]
    fn test_repeated_failures_overwrite_window() {
        let (clock, tracker) = tracker();
        let first = tracker.record_quota_failure();
        let second = tracker.record_quota_failure();
        assert_eq!(first, second);

        clock.advance(Duration::from_secs(60));
        let third = tracker.record_quota_failure();
        assert_eq!((third - first).num_seconds(), 60);
        assert_eq!(tracker.check(), Some(third));
    }

    #[test]
    fn test_huge_window_still_suppresses() {
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let tracker =
            CooldownTracker::new(Duration::from_secs(10_000_000_000_000_000), clock.clone());

        let until = tracker.record_quota_failure();
        assert!(until > clock.now());
        assert!(matches!(tracker.state(), CooldownState::CoolingDown { .. }));

        clock.advance(DEFAULT_COOLDOWN);
        assert!(tracker.check().is_some());
    }

    #[test]
    fn test_status_snapshot() {
        let (_clock, tracker) = tracker();
        assert!(tracker.status().available);

        let until = tracker.record_quota_failure();
        let status = tracker.status();
        assert!(!status.available);
        assert_eq!(status.cooldown_until, Some(until));
        assert!(status.quota_exceeded);
    }
}
