//! Stopwatch.

use tracing::info;

use crate::core::{format_stopwatch, Clock, SystemClock};
use crate::features::countdown::TimerEvent;
use crate::features::engine::{TimerEngine, TimerKind, TimerSnapshot};

/// Counts up from zero. Pauses do not count.
#[derive(Debug)]
pub struct Stopwatch<C: Clock = SystemClock> {
    clock: C,
    /// Time banked by earlier runs.
    accumulated_ms: i64,
    /// Start of the current run while running.
    started_at_ms: Option<i64>,
}

impl<C: Clock> Stopwatch<C> {
    /// Create a stopwatch at zero.
    #[must_use]
    pub const fn with_clock(clock: C) -> Self {
        Self {
            clock,
            accumulated_ms: 0,
            started_at_ms: None,
        }
    }

    /// The clock driving this stopwatch.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Time counted so far.
    #[must_use]
    pub fn elapsed_ms(&self) -> i64 {
        self.started_at_ms.map_or(self.accumulated_ms, |start| {
            let run = self.clock.now_ms().saturating_sub(start).max(0);
            self.accumulated_ms.saturating_add(run)
        })
    }
}

impl<C: Clock> TimerEngine for Stopwatch<C> {
    fn kind(&self) -> TimerKind {
        TimerKind::Stopwatch
    }

    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn toggle(&mut self) {
        if self.started_at_ms.is_some() {
            self.accumulated_ms = self.elapsed_ms();
            self.started_at_ms = None;
            info!(elapsed_ms = self.accumulated_ms, "stopwatch paused");
        } else {
            self.started_at_ms = Some(self.clock.now_ms());
            info!(elapsed_ms = self.accumulated_ms, "stopwatch started");
        }
    }

    fn reset(&mut self) {
        self.accumulated_ms = 0;
        self.started_at_ms = None;
    }

    fn skip_phase(&mut self) {}

    fn tick(&mut self) {}

    fn take_events(&mut self) -> Vec<TimerEvent> {
        Vec::new()
    }

    fn is_running(&self) -> bool {
        self.started_at_ms.is_some()
    }

    fn is_complete(&self) -> bool {
        false
    }

    fn snapshot(&self) -> TimerSnapshot {
        let elapsed = self.elapsed_ms();
        TimerSnapshot {
            kind: TimerKind::Stopwatch,
            phase: None,
            current_cycle: 1,
            cycle_count: 1,
            mode: None,
            remaining_ms: 0,
            display: format_stopwatch(elapsed),
            total_elapsed_ms: elapsed,
            total_duration_ms: 0,
            running: self.is_running(),
            complete: false,
            run_progress: 0.0,
        }
    }

    fn next_deadline_ms(&self) -> Option<i64> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    #[test]
    fn test_counts_up() {
        let clock = ManualClock::new(5_000);
        let mut watch = Stopwatch::with_clock(&clock);
        assert_eq!(watch.snapshot().display, "00:00:00");

        watch.toggle();
        clock.advance(61_230);
        assert_eq!(watch.elapsed_ms(), 61_230);
        assert_eq!(watch.snapshot().display, "01:01:23");
        assert!(watch.snapshot().running);
    }

    #[test]
    fn test_accumulates_across_pauses() {
        let clock = ManualClock::new(0);
        let mut watch = Stopwatch::with_clock(&clock);
        watch.toggle();
        clock.advance(1_500);
        watch.toggle();

        clock.advance(10_000);
        assert_eq!(watch.elapsed_ms(), 1_500);

        watch.toggle();
        clock.advance(700);
        assert_eq!(watch.elapsed_ms(), 2_200);
        watch.toggle();
        assert_eq!(watch.snapshot().total_elapsed_ms, 2_200);
    }

    #[test]
    fn test_reset_and_never_completes() {
        let clock = ManualClock::new(0);
        let mut watch = Stopwatch::with_clock(&clock);
        watch.toggle();
        clock.advance(3_000);
        watch.tick();
        watch.skip_phase();
        assert!(!watch.is_complete());
        assert!(watch.take_events().is_empty());

        watch.reset();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed_ms(), 0);
    }
}
