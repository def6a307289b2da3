//! The periodic tick handle.

use std::time::Duration;

/// Nominal tick cadence.
pub const DEFAULT_TICK_INTERVAL_MS: i64 = 100;

/// A cancellable, single-shot-at-a-time tick schedule.
///
/// At most one tick is ever pending. The next one is scheduled only after
/// the previous tick has been handled, so ticks cannot overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSchedule {
    interval_ms: i64,
    next_due_ms: Option<i64>,
}

impl TickSchedule {
    /// Create an idle schedule. Intervals below 1 ms are raised to 1 ms.
    #[must_use]
    pub fn new(interval_ms: i64) -> Self {
        Self {
            interval_ms: interval_ms.max(1),
            next_due_ms: None,
        }
    }

    /// Nominal interval between ticks.
    #[must_use]
    pub const fn interval_ms(&self) -> i64 {
        self.interval_ms
    }

    /// Schedule the first tick relative to `now_ms`. Keeps an already pending
    /// tick as it is.
    pub fn arm(&mut self, now_ms: i64) {
        if self.next_due_ms.is_none() {
            self.next_due_ms = Some(now_ms + self.interval_ms);
        }
    }

    /// Drop the pending tick.
    pub fn cancel(&mut self) {
        self.next_due_ms = None;
    }

    /// Whether a tick is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_due_ms.is_some()
    }

    /// When the pending tick fires.
    #[must_use]
    pub const fn next_due_ms(&self) -> Option<i64> {
        self.next_due_ms
    }

    /// Whether the pending tick should fire at `now_ms`.
    #[must_use]
    pub fn is_due(&self, now_ms: i64) -> bool {
        self.next_due_ms.is_some_and(|due| due <= now_ms)
    }

    /// Mark the pending tick as handled and queue the next one.
    pub fn complete(&mut self, now_ms: i64) {
        if self.next_due_ms.is_some() {
            self.next_due_ms = Some(now_ms + self.interval_ms);
        }
    }

    /// How long to wait before the pending tick. `None` when idle.
    #[must_use]
    pub fn time_until(&self, now_ms: i64) -> Option<Duration> {
        self.next_due_ms.map(|due| {
            let wait = u64::try_from(due - now_ms).unwrap_or(0);
            Duration::from_millis(wait)
        })
    }
}

impl Default for TickSchedule {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_and_fire() {
        let mut schedule = TickSchedule::default();
        assert!(!schedule.is_armed());
        assert!(!schedule.is_due(1_000_000));

        schedule.arm(1_000);
        assert_eq!(schedule.next_due_ms(), Some(1_100));
        assert!(!schedule.is_due(1_099));
        assert!(schedule.is_due(1_100));

        // Firing late schedules relative to when the tick was handled.
        schedule.complete(1_140);
        assert_eq!(schedule.next_due_ms(), Some(1_240));
    }

    #[test]
    fn test_arm_keeps_pending_tick() {
        let mut schedule = TickSchedule::new(100);
        schedule.arm(0);
        schedule.arm(50);
        assert_eq!(schedule.next_due_ms(), Some(100));
    }

    #[test]
    fn test_cancel() {
        let mut schedule = TickSchedule::new(100);
        schedule.arm(0);
        schedule.cancel();
        assert!(!schedule.is_armed());
        assert!(schedule.time_until(0).is_none());

        // Completing after cancel does not resurrect the schedule.
        schedule.complete(500);
        assert!(!schedule.is_armed());
    }

    #[test]
    fn test_time_until() {
        let mut schedule = TickSchedule::new(100);
        schedule.arm(0);
        assert_eq!(schedule.time_until(40), Some(Duration::from_millis(60)));
        assert_eq!(schedule.time_until(250), Some(Duration::ZERO));
    }

    #[test]
    fn test_interval_floor() {
        assert_eq!(TickSchedule::new(0).interval_ms(), 1);
    }
}
