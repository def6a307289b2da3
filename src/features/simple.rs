//! A plain countdown.
//!
//! Counts one duration down to zero, then raises the alarm and stops.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{format_countdown, minutes_seconds_to_ms, Clock, SystemClock};
use crate::features::alert::AlertPattern;
use crate::features::countdown::settings::clamp_duration;
use crate::features::countdown::{TimerEvent, TimerState};
use crate::features::engine::{TimerEngine, TimerKind, TimerSnapshot};

/// Length of the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSettings {
    /// Countdown length in milliseconds.
    pub duration_ms: i64,
}

impl CountdownSettings {
    /// A countdown of `duration_ms`.
    #[must_use]
    pub const fn new(duration_ms: i64) -> Self {
        Self { duration_ms }
    }

    /// Clamp the duration into its valid range.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self::new(clamp_duration(self.duration_ms))
    }
}

impl Default for CountdownSettings {
    /// Five minutes.
    fn default() -> Self {
        Self::new(minutes_seconds_to_ms(5, 0))
    }
}

/// A single drift-corrected countdown.
#[derive(Debug)]
pub struct SimpleCountdown<C: Clock = SystemClock> {
    settings: CountdownSettings,
    state: TimerState,
    clock: C,
    outbox: Vec<TimerEvent>,
    finished: bool,
}

impl<C: Clock> SimpleCountdown<C> {
    /// Create a stopped countdown.
    #[must_use]
    pub fn with_clock(settings: CountdownSettings, clock: C) -> Self {
        let settings = settings.sanitized();
        Self {
            state: TimerState::new(settings.duration_ms),
            settings,
            clock,
            outbox: Vec::new(),
            finished: false,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &CountdownSettings {
        &self.settings
    }

    /// The clock driving this countdown.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Replace the duration. A stopped countdown restarts from it.
    pub fn configure(&mut self, settings: CountdownSettings) {
        self.settings = settings.sanitized();
        if !self.state.running {
            self.state.remaining_ms = self.settings.duration_ms;
            self.finished = false;
        }
    }

    /// Remaining time, never negative.
    #[must_use]
    pub fn remaining_ms(&self) -> i64 {
        self.state.display_remaining_ms()
    }

    fn finish(&mut self, at_ms: i64) {
        self.state.total_elapsed_ms = at_ms.saturating_sub(self.state.run_start_epoch_ms).max(0);
        self.state.remaining_ms = 0;
        self.state.running = false;
        self.finished = true;
        info!(duration_ms = self.settings.duration_ms, "countdown finished");
        self.outbox.push(TimerEvent::Alert {
            pattern: AlertPattern::alarm(),
            at_ms,
        });
        self.outbox.push(TimerEvent::Completed { at_ms });
    }
}

impl<C: Clock> TimerEngine for SimpleCountdown<C> {
    fn kind(&self) -> TimerKind {
        TimerKind::Countdown
    }

    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn toggle(&mut self) {
        if self.state.running {
            self.tick();
            if self.state.running {
                self.state.running = false;
                info!(remaining_ms = self.state.remaining_ms, "countdown paused");
            }
            return;
        }

        if self.finished {
            self.reset();
        }
        let now = self.clock.now_ms();
        self.state.run_start_epoch_ms = now.saturating_sub(self.state.total_elapsed_ms);
        self.state.phase_start_epoch_ms = now;
        self.state.phase_initial_ms = self.state.remaining_ms;
        self.state.running = true;
        info!(remaining_ms = self.state.remaining_ms, "countdown started");
    }

    fn reset(&mut self) {
        self.state = TimerState::new(self.settings.duration_ms);
        self.finished = false;
    }

    fn skip_phase(&mut self) {}

    fn tick(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.sync(self.clock.now_ms());
        if self.state.remaining_ms <= 0 {
            let end = self.state.phase_end_epoch_ms();
            self.finish(end);
        }
    }

    fn take_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.outbox)
    }

    fn is_running(&self) -> bool {
        self.state.running
    }

    fn is_complete(&self) -> bool {
        self.finished
    }

    #[allow(clippy::cast_precision_loss)]
    fn snapshot(&self) -> TimerSnapshot {
        let run_progress = if self.settings.duration_ms <= 0 {
            1.0
        } else {
            (1.0 - self.remaining_ms() as f64 / self.settings.duration_ms as f64).clamp(0.0, 1.0)
        };

        TimerSnapshot {
            kind: TimerKind::Countdown,
            phase: None,
            current_cycle: 1,
            cycle_count: 1,
            mode: None,
            remaining_ms: self.remaining_ms(),
            display: format_countdown(self.state.remaining_ms),
            total_elapsed_ms: self.state.total_elapsed_ms,
            total_duration_ms: self.settings.duration_ms,
            running: self.state.running,
            complete: self.finished,
            run_progress,
        }
    }

    fn next_deadline_ms(&self) -> Option<i64> {
        self.state.running.then(|| self.state.phase_end_epoch_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    fn countdown(ms: i64, clock: &ManualClock) -> SimpleCountdown<&ManualClock> {
        SimpleCountdown::with_clock(CountdownSettings::new(ms), clock)
    }

    #[test]
    fn test_default_is_five_minutes() {
        let clock = ManualClock::new(0);
        let c = SimpleCountdown::with_clock(CountdownSettings::default(), &clock);
        assert_eq!(c.snapshot().display, "05:00");
        assert!(c.snapshot().phase.is_none());
    }

    #[test]
    fn test_finishes_with_alarm() {
        let clock = ManualClock::new(0);
        let mut c = countdown(3_000, &clock);
        c.toggle();
        clock.advance(2_900);
        c.tick();
        assert!(c.is_running());
        assert_eq!(c.remaining_ms(), 100);

        clock.advance(250);
        c.tick();
        assert!(!c.is_running());
        assert!(c.is_complete());
        assert_eq!(c.remaining_ms(), 0);

        let events = c.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            events[0],
            TimerEvent::Alert { pattern, at_ms: 3_000 } if pattern.pulses == 30
        ));
        assert!(events[1].is_completed());
    }

    #[test]
    fn test_pause_after_end_finishes_once() {
        let clock = ManualClock::new(0);
        let mut c = countdown(1_000, &clock);
        c.toggle();
        clock.advance(1_200);
        c.toggle();
        assert!(c.is_complete());
        assert_eq!(c.snapshot().total_elapsed_ms, 1_000);
        assert_eq!(c.take_events().iter().filter(|e| e.is_completed()).count(), 1);

        // Starting again runs the full countdown.
        c.toggle();
        assert!(c.is_running());
        assert!(!c.is_complete());
        assert_eq!(c.remaining_ms(), 1_000);
    }

    #[test]
    fn test_pause_resume_and_skip() {
        let clock = ManualClock::new(0);
        let mut c = countdown(10_000, &clock);
        c.toggle();
        clock.advance(4_000);
        c.toggle();
        clock.advance(60_000);
        c.skip_phase();
        c.toggle();
        clock.advance(1_000);
        c.tick();
        assert_eq!(c.remaining_ms(), 5_000);
        assert!(c.take_events().is_empty());
    }

    #[test]
    fn test_configure_and_reset() {
        let clock = ManualClock::new(0);
        let mut c = countdown(1_000, &clock);
        c.configure(CountdownSettings::new(90_000));
        assert_eq!(c.snapshot().display, "01:30");

        c.toggle();
        clock.advance(30_000);
        c.tick();
        c.reset();
        assert!(!c.is_running());
        assert_eq!(c.remaining_ms(), 90_000);
        assert!((c.snapshot().run_progress).abs() < f64::EPSILON);
    }
}
