//! The timer kinds behind one interface.
//!
//! ttimer offers four timers: the work/rest interval countdown, a Pomodoro
//! timer, a plain countdown and a stopwatch. Each implements
//! [`TimerEngine`], so the driver, the headless runner and the TUI never need
//! to know which one they hold. [`AnyTimer`] is the closed set the UI switches
//! between.

use serde::{Deserialize, Serialize};

use crate::core::{Clock, SystemClock};
use crate::features::countdown::{CountdownTimer, Phase, TimerEvent, TimerMode, TimerSettings};
use crate::features::pomodoro::{PomodoroSettings, PomodoroTimer};
use crate::features::simple::{CountdownSettings, SimpleCountdown};
use crate::features::stopwatch::Stopwatch;

/// Which timer to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerKind {
    /// Alternating work and rest phases.
    #[default]
    Interval,
    /// Work sessions with short and long breaks.
    Pomodoro,
    /// A single countdown ending in an alarm.
    Countdown,
    /// Counts up from zero.
    Stopwatch,
}

impl TimerKind {
    /// All kinds in switching order.
    pub const ALL: [Self; 4] = [Self::Interval, Self::Pomodoro, Self::Countdown, Self::Stopwatch];

    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Interval => "Interval",
            Self::Pomodoro => "Pomodoro",
            Self::Countdown => "Countdown",
            Self::Stopwatch => "Stopwatch",
        }
    }

    /// The kind after this one, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Interval => Self::Pomodoro,
            Self::Pomodoro => Self::Countdown,
            Self::Countdown => Self::Stopwatch,
            Self::Stopwatch => Self::Interval,
        }
    }

    /// Whether the timer moves through named phases.
    #[must_use]
    pub const fn has_phases(&self) -> bool {
        matches!(self, Self::Interval | Self::Pomodoro)
    }
}

impl std::fmt::Display for TimerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operations every timer supports.
///
/// Events produced by an operation stay queued until [`take_events`] is
/// called.
///
/// [`take_events`]: TimerEngine::take_events
pub trait TimerEngine {
    /// Which kind of timer this is.
    fn kind(&self) -> TimerKind;

    /// Now, from the timer's clock.
    fn now_ms(&self) -> i64;

    /// Start or pause.
    fn toggle(&mut self);

    /// Stop and rewind to the initial state.
    fn reset(&mut self);

    /// End the current phase now. Timers without phases ignore this.
    fn skip_phase(&mut self);

    /// Advance to the current clock time.
    fn tick(&mut self);

    /// Drain events produced since the last call.
    fn take_events(&mut self) -> Vec<TimerEvent>;

    /// Whether time is advancing.
    fn is_running(&self) -> bool;

    /// Whether the timer reached its end.
    fn is_complete(&self) -> bool;

    /// A serializable view of the timer.
    fn snapshot(&self) -> TimerSnapshot;

    /// When the next tick would end a phase or the run, while running.
    fn next_deadline_ms(&self) -> Option<i64>;
}

/// Point-in-time view of a timer for display and JSON output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    /// Which timer produced the view.
    pub kind: TimerKind,
    /// Current phase, for timers that have phases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<Phase>,
    /// 1-based cycle or Pomodoro session number.
    pub current_cycle: u32,
    /// Cycles in an interval run, sessions per set for Pomodoro.
    pub cycle_count: u32,
    /// Stop condition of an interval run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
    /// Remaining time, clamped at zero. Zero for the stopwatch.
    pub remaining_ms: i64,
    /// The main readout: `MM:SS`, or `MM:SS:CC` for the stopwatch.
    pub display: String,
    /// Elapsed run time excluding pauses.
    pub total_elapsed_ms: i64,
    /// Configured run length, where one applies.
    pub total_duration_ms: i64,
    /// Whether time is advancing.
    pub running: bool,
    /// Whether the timer reached its end.
    pub complete: bool,
    /// Progress through the whole run.
    pub run_progress: f64,
}

/// Settings for every kind, plus which kind is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerProfile {
    /// Selected kind.
    pub kind: TimerKind,
    /// Interval timer settings.
    pub interval: TimerSettings,
    /// Pomodoro settings.
    pub pomodoro: PomodoroSettings,
    /// Plain countdown settings.
    pub countdown: CountdownSettings,
}

impl TimerProfile {
    /// The profile for a run nobody is watching.
    ///
    /// Pomodoro phases start on their own, and the run stops after
    /// `rounds` sessions or one full set when no limit is given.
    #[must_use]
    pub fn unattended(mut self) -> Self {
        self.pomodoro.auto_start = true;
        if self.pomodoro.session_limit.is_none() {
            self.pomodoro.session_limit = Some(self.pomodoro.sessions_until_long_break);
        }
        self.pomodoro = self.pomodoro.sanitized();
        self
    }
}

/// One of the four timers.
#[derive(Debug)]
pub enum AnyTimer<C: Clock = SystemClock> {
    /// Work/rest interval countdown.
    Interval(CountdownTimer<C>),
    /// Pomodoro timer.
    Pomodoro(PomodoroTimer<C>),
    /// Plain countdown.
    Countdown(SimpleCountdown<C>),
    /// Stopwatch.
    Stopwatch(Stopwatch<C>),
}

impl<C: Clock> AnyTimer<C> {
    /// Build a stopped timer of `kind` from the matching part of `profile`.
    #[must_use]
    pub fn build(kind: TimerKind, profile: &TimerProfile, clock: C) -> Self {
        match kind {
            TimerKind::Interval => {
                Self::Interval(CountdownTimer::with_clock(profile.interval, clock))
            }
            TimerKind::Pomodoro => {
                Self::Pomodoro(PomodoroTimer::with_clock(profile.pomodoro, clock))
            }
            TimerKind::Countdown => {
                Self::Countdown(SimpleCountdown::with_clock(profile.countdown, clock))
            }
            TimerKind::Stopwatch => Self::Stopwatch(Stopwatch::with_clock(clock)),
        }
    }

    /// Apply the part of `profile` matching this timer's kind.
    ///
    /// Returns whether anything changed. Unchanged settings leave a paused
    /// timer exactly where it was.
    pub fn configure(&mut self, profile: &TimerProfile) -> bool {
        match self {
            Self::Interval(timer) if *timer.settings() != profile.interval => {
                timer.configure(profile.interval);
                true
            }
            Self::Pomodoro(timer) if *timer.settings() != profile.pomodoro => {
                timer.configure(profile.pomodoro);
                true
            }
            Self::Countdown(timer) if *timer.settings() != profile.countdown => {
                timer.configure(profile.countdown);
                true
            }
            _ => false,
        }
    }

    /// The clock driving the timer.
    #[must_use]
    pub const fn clock(&self) -> &C {
        match self {
            Self::Interval(timer) => timer.clock(),
            Self::Pomodoro(timer) => timer.clock(),
            Self::Countdown(timer) => timer.clock(),
            Self::Stopwatch(timer) => timer.clock(),
        }
    }

    fn engine(&self) -> &dyn TimerEngine {
        match self {
            Self::Interval(timer) => timer,
            Self::Pomodoro(timer) => timer,
            Self::Countdown(timer) => timer,
            Self::Stopwatch(timer) => timer,
        }
    }

    fn engine_mut(&mut self) -> &mut dyn TimerEngine {
        match self {
            Self::Interval(timer) => timer,
            Self::Pomodoro(timer) => timer,
            Self::Countdown(timer) => timer,
            Self::Stopwatch(timer) => timer,
        }
    }
}

impl<C: Clock> TimerEngine for AnyTimer<C> {
    fn kind(&self) -> TimerKind {
        self.engine().kind()
    }

    fn now_ms(&self) -> i64 {
        self.engine().now_ms()
    }

    fn toggle(&mut self) {
        self.engine_mut().toggle();
    }

    fn reset(&mut self) {
        self.engine_mut().reset();
    }

    fn skip_phase(&mut self) {
        self.engine_mut().skip_phase();
    }

    fn tick(&mut self) {
        self.engine_mut().tick();
    }

    fn take_events(&mut self) -> Vec<TimerEvent> {
        self.engine_mut().take_events()
    }

    fn is_running(&self) -> bool {
        self.engine().is_running()
    }

    fn is_complete(&self) -> bool {
        self.engine().is_complete()
    }

    fn snapshot(&self) -> TimerSnapshot {
        self.engine().snapshot()
    }

    fn next_deadline_ms(&self) -> Option<i64> {
        self.engine().next_deadline_ms()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;

    #[test]
    fn test_kind_serde_and_cycle() {
        assert_eq!(
            serde_json::to_string(&TimerKind::Stopwatch).unwrap(),
            "\"stopwatch\""
        );
        let kind: TimerKind = serde_json::from_str("\"pomodoro\"").unwrap();
        assert_eq!(kind, TimerKind::Pomodoro);

        let mut kind = TimerKind::default();
        for expected in TimerKind::ALL.iter().cycle().skip(1).take(4) {
            kind = kind.next();
            assert_eq!(kind, *expected);
        }
        assert_eq!(kind, TimerKind::Interval);
    }

    #[test]
    fn test_build_matches_kind() {
        let clock = ManualClock::new(0);
        let profile = TimerProfile::default();
        for kind in TimerKind::ALL {
            let timer = AnyTimer::build(kind, &profile, &clock);
            assert_eq!(timer.kind(), kind);
            assert_eq!(timer.snapshot().kind, kind);
            assert!(!timer.is_running());
            assert_eq!(timer.snapshot().phase.is_some(), kind.has_phases());
        }
    }

    #[test]
    fn test_configure_only_reports_changes() {
        let clock = ManualClock::new(0);
        let mut profile = TimerProfile::default();
        let mut timer = AnyTimer::build(TimerKind::Pomodoro, &profile, &clock);
        assert!(!timer.configure(&profile));

        profile.interval.work_duration_ms = 5_000;
        assert!(!timer.configure(&profile));

        profile.pomodoro.work_duration_ms = 5_000;
        assert!(timer.configure(&profile));
        assert_eq!(timer.snapshot().remaining_ms, 5_000);
    }

    #[test]
    fn test_paused_timer_survives_unchanged_configure() {
        let clock = ManualClock::new(0);
        let profile = TimerProfile::default();
        let mut timer = AnyTimer::build(TimerKind::Countdown, &profile, &clock);
        timer.toggle();
        clock.advance(10_000);
        timer.toggle();
        timer.configure(&profile);
        assert_eq!(timer.snapshot().remaining_ms, 290_000);
    }

    #[test]
    fn test_unattended_profile() {
        let profile = TimerProfile::default().unattended();
        assert!(profile.pomodoro.auto_start);
        assert_eq!(profile.pomodoro.session_limit, Some(4));

        let mut limited = TimerProfile::default();
        limited.pomodoro.session_limit = Some(2);
        assert_eq!(limited.unattended().pomodoro.session_limit, Some(2));
    }
}
