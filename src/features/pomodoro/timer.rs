//! The Pomodoro state machine.

use tracing::{debug, info};

use super::PomodoroSettings;
use crate::core::{format_countdown, Clock, SystemClock};
use crate::features::alert::AlertPattern;
use crate::features::countdown::{Phase, TimerEvent, TimerState};
use crate::features::engine::{TimerEngine, TimerKind, TimerSnapshot};

/// Upper bound on phase changes handled by one tick with auto-start on.
const MAX_TRANSITIONS_PER_TICK: u32 = 10_000;

/// A drift-corrected Pomodoro timer.
///
/// Shares [`TimerState`] with the interval countdown; `current_cycle` is the
/// session number.
#[derive(Debug)]
pub struct PomodoroTimer<C: Clock = SystemClock> {
    settings: PomodoroSettings,
    state: TimerState,
    clock: C,
    outbox: Vec<TimerEvent>,
    finished: bool,
}

impl PomodoroTimer<SystemClock> {
    /// Create a timer driven by the system clock.
    #[must_use]
    pub fn new(settings: PomodoroSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> PomodoroTimer<C> {
    /// Create a stopped timer at the start of session 1.
    #[must_use]
    pub fn with_clock(settings: PomodoroSettings, clock: C) -> Self {
        let settings = settings.sanitized();
        Self {
            state: TimerState::new(settings.work_duration_ms),
            settings,
            clock,
            outbox: Vec::new(),
            finished: false,
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &PomodoroSettings {
        &self.settings
    }

    /// Current run state.
    #[must_use]
    pub const fn state(&self) -> &TimerState {
        &self.state
    }

    /// The clock driving this timer.
    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    /// Replace the settings. A stopped timer takes the new length of its
    /// current phase at once.
    pub fn configure(&mut self, settings: PomodoroSettings) {
        self.settings = settings.sanitized();
        if !self.state.running {
            self.state.remaining_ms = self.settings.phase_duration_ms(self.state.phase);
        }
        debug!(settings = ?self.settings, "pomodoro configured");
    }

    /// Start or pause. A phase that ended since the last tick is settled
    /// first.
    pub fn toggle(&mut self) {
        if self.state.running {
            self.tick();
            if !self.state.running {
                return;
            }
            self.state.running = false;
            info!(
                phase = %self.state.phase,
                session = self.state.current_cycle,
                remaining_ms = self.state.remaining_ms,
                "pomodoro paused"
            );
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
        info!(
            phase = %self.state.phase,
            session = self.state.current_cycle,
            remaining_ms = self.state.remaining_ms,
            "pomodoro started"
        );
    }

    /// Back to session 1, stopped.
    pub fn reset(&mut self) {
        self.state = TimerState::new(self.settings.work_duration_ms);
        self.finished = false;
        info!("pomodoro reset");
    }

    /// Stop and move on to the next phase without an alarm.
    pub fn skip_phase(&mut self) {
        if self.finished {
            return;
        }
        let now = self.clock.now_ms();
        if self.state.running {
            self.state.sync(now);
        }
        debug!(phase = %self.state.phase, "pomodoro phase skipped");
        self.stop_at(now);
        self.advance(now);
    }

    /// Advance to the current clock time.
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        let now = self.clock.now_ms();
        self.state.sync(now);

        let mut budget = MAX_TRANSITIONS_PER_TICK;
        while self.state.running && self.state.remaining_ms <= 0 && budget > 0 {
            let boundary = self.state.phase_end_epoch_ms();
            self.outbox.push(TimerEvent::Alert {
                pattern: AlertPattern::alarm(),
                at_ms: boundary,
            });
            if !self.settings.auto_start {
                self.stop_at(boundary);
            }
            self.advance(boundary);
            if self.state.running {
                self.state.sync(now);
            }
            budget -= 1;
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether a session limit was reached.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.finished && !self.state.running
    }

    /// A serializable view of the timer.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        let per_set = self.settings.sessions_until_long_break;
        let position = (self.state.current_cycle - 1) % per_set + 1;
        let run_progress = if self.finished {
            1.0
        } else {
            f64::from(position) / f64::from(per_set)
        };

        TimerSnapshot {
            kind: TimerKind::Pomodoro,
            phase: Some(self.state.phase),
            current_cycle: self.state.current_cycle,
            cycle_count: per_set,
            mode: None,
            remaining_ms: self.state.display_remaining_ms(),
            display: format_countdown(self.state.remaining_ms),
            total_elapsed_ms: self.state.total_elapsed_ms,
            total_duration_ms: 0,
            running: self.state.running,
            complete: self.is_complete(),
            run_progress,
        }
    }

    fn stop_at(&mut self, at_ms: i64) {
        if self.state.running {
            self.state.total_elapsed_ms =
                at_ms.saturating_sub(self.state.run_start_epoch_ms).max(0);
            self.state.running = false;
        }
    }

    /// Move to the phase after the current one, anchored at `at_ms`.
    fn advance(&mut self, at_ms: i64) {
        let next = match self.state.phase {
            Phase::Work => self.settings.break_after(self.state.current_cycle),
            Phase::Rest | Phase::ShortBreak | Phase::LongBreak => {
                if self
                    .settings
                    .session_limit
                    .is_some_and(|limit| self.state.current_cycle >= limit)
                {
                    self.finish(at_ms);
                    return;
                }
                self.state.current_cycle += 1;
                Phase::Work
            }
        };

        let duration = self.settings.phase_duration_ms(next);
        self.state.phase = next;
        self.state.anchor_phase(at_ms, duration);
        debug!(phase = %next, session = self.state.current_cycle, "pomodoro phase changed");
        self.outbox.push(TimerEvent::PhaseChanged {
            phase: next,
            cycle: self.state.current_cycle,
            duration_ms: duration,
            at_ms,
        });
    }

    fn finish(&mut self, at_ms: i64) {
        self.stop_at(at_ms);
        self.state.remaining_ms = 0;
        self.finished = true;
        info!(sessions = self.state.current_cycle, "pomodoro completed");
        self.outbox.push(TimerEvent::Completed { at_ms });
    }
}

impl<C: Clock> TimerEngine for PomodoroTimer<C> {
    fn kind(&self) -> TimerKind {
        TimerKind::Pomodoro
    }

    fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    fn toggle(&mut self) {
        Self::toggle(self);
    }

    fn reset(&mut self) {
        Self::reset(self);
    }

    fn skip_phase(&mut self) {
        Self::skip_phase(self);
    }

    fn tick(&mut self) {
        Self::tick(self);
    }

    fn take_events(&mut self) -> Vec<TimerEvent> {
        Self::take_events(self)
    }

    fn is_running(&self) -> bool {
        self.state.running
    }

    fn is_complete(&self) -> bool {
        Self::is_complete(self)
    }

    fn snapshot(&self) -> TimerSnapshot {
        Self::snapshot(self)
    }

    fn next_deadline_ms(&self) -> Option<i64> {
        self.state.running.then(|| self.state.phase_end_epoch_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    fn short_settings() -> PomodoroSettings {
        PomodoroSettings {
            work_duration_ms: 1_000,
            short_break_ms: 200,
            long_break_ms: 500,
            sessions_until_long_break: 4,
            ..PomodoroSettings::default()
        }
    }

    fn timer(settings: PomodoroSettings, clock: &ManualClock) -> PomodoroTimer<&ManualClock> {
        PomodoroTimer::with_clock(settings, clock)
    }

    /// Start the timer and let the current phase run out.
    fn run_phase(t: &mut PomodoroTimer<&ManualClock>, clock: &ManualClock) {
        t.toggle();
        clock.advance(t.state().remaining_ms);
        t.tick();
    }

    #[test]
    fn test_natural_end_rings_and_waits() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);
        run_phase(&mut t, &clock);

        assert!(!t.state().running);
        assert_eq!(t.state().phase, Phase::ShortBreak);
        assert_eq!(t.state().current_cycle, 1);
        assert_eq!(t.state().remaining_ms, 200);
        assert_eq!(t.state().total_elapsed_ms, 1_000);

        let events = t.take_events();
        assert!(matches!(
            events[0],
            TimerEvent::Alert { pattern, at_ms: 1_000 } if pattern == AlertPattern::alarm()
        ));
        assert!(matches!(
            events[1],
            TimerEvent::PhaseChanged {
                phase: Phase::ShortBreak,
                cycle: 1,
                duration_ms: 200,
                ..
            }
        ));

        // Nothing happens until the user starts the break.
        clock.advance(5_000);
        t.tick();
        assert_eq!(t.state().remaining_ms, 200);
    }

    #[test]
    fn test_long_break_after_fourth_session() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);

        let mut phases = Vec::new();
        for _ in 0..10 {
            run_phase(&mut t, &clock);
            phases.push((t.state().phase, t.state().current_cycle));
        }

        assert_eq!(
            phases,
            vec![
                (Phase::ShortBreak, 1),
                (Phase::Work, 2),
                (Phase::ShortBreak, 2),
                (Phase::Work, 3),
                (Phase::ShortBreak, 3),
                (Phase::Work, 4),
                (Phase::LongBreak, 4),
                (Phase::Work, 5),
                (Phase::ShortBreak, 5),
                (Phase::Work, 6),
            ]
        );
        assert!(!t.is_complete());
    }

    #[test]
    fn test_skip_advances_without_alarm() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);
        t.toggle();
        clock.advance(300);
        t.skip_phase();

        assert!(!t.state().running);
        assert_eq!(t.state().phase, Phase::ShortBreak);
        assert_eq!(t.state().remaining_ms, 200);
        let events = t.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], TimerEvent::PhaseChanged { .. }));

        t.skip_phase();
        assert_eq!(t.state().phase, Phase::Work);
        assert_eq!(t.state().current_cycle, 2);
    }

    #[test]
    fn test_auto_start_runs_to_session_limit() {
        let clock = ManualClock::new(0);
        let settings = PomodoroSettings {
            sessions_until_long_break: 2,
            auto_start: true,
            session_limit: Some(2),
            ..short_settings()
        };
        let mut t = timer(settings, &clock);
        t.toggle();
        // 1000 + 200 + 1000 + 500
        clock.advance(2_700);
        t.tick();

        assert!(t.is_complete());
        assert!(!TimerEngine::is_running(&t));
        assert_eq!(t.state().total_elapsed_ms, 2_700);
        let events = t.take_events();
        let phases: Vec<Phase> = events
            .iter()
            .filter_map(|e| match e {
                TimerEvent::PhaseChanged { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![Phase::ShortBreak, Phase::Work, Phase::LongBreak]);
        assert_eq!(events.iter().filter(|e| e.is_completed()).count(), 1);
        assert!((t.snapshot().run_progress - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_pause_after_boundary_settles_phase() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);
        t.toggle();
        clock.advance(1_100);
        t.toggle();

        assert!(!t.state().running);
        assert_eq!(t.state().phase, Phase::ShortBreak);
        assert_eq!(t.state().remaining_ms, 200);
        assert_eq!(t.take_events().len(), 2);
    }

    #[test]
    fn test_pause_resume_keeps_remaining() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);
        t.toggle();
        clock.advance(400);
        t.toggle();
        clock.advance(10_000);
        t.toggle();
        clock.advance(100);
        t.tick();
        assert_eq!(t.state().remaining_ms, 500);
        assert_eq!(t.state().total_elapsed_ms, 500);
    }

    #[test]
    fn test_reset_and_snapshot() {
        let clock = ManualClock::new(0);
        let mut t = timer(short_settings(), &clock);
        run_phase(&mut t, &clock);
        t.reset();
        assert_eq!(*t.state(), TimerState::new(1_000));

        let snapshot = t.snapshot();
        assert_eq!(snapshot.kind, TimerKind::Pomodoro);
        assert_eq!(snapshot.phase, Some(Phase::Work));
        assert_eq!(snapshot.cycle_count, 4);
        assert_eq!(snapshot.display, "00:01");
        assert!(snapshot.mode.is_none());
    }
}
