//! Mutable run state.

use serde::{Deserialize, Serialize};

/// A countdown segment.
///
/// Interval timers alternate `Work` and `Rest`. Pomodoro timers follow `Work`
/// with a `ShortBreak` or a `LongBreak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    /// Work phase
    #[default]
    Work,
    /// Rest phase
    Rest,
    /// Pomodoro break between sessions
    ShortBreak,
    /// Pomodoro break after a full set of sessions
    LongBreak,
}

impl Phase {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Work => "Work Time",
            Self::Rest => "Rest Time",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Whether this is any kind of pause from work.
    #[must_use]
    pub const fn is_break(&self) -> bool {
        !matches!(self, Self::Work)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Work => write!(f, "Work"),
            Self::Rest => write!(f, "Rest"),
            Self::ShortBreak => write!(f, "Short break"),
            Self::LongBreak => write!(f, "Long break"),
        }
    }
}

/// Everything that changes while a timer runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Current phase.
    pub phase: Phase,
    /// 1-based cycle number.
    pub current_cycle: u32,
    /// Time left in the current phase. May dip below zero between ticks.
    pub remaining_ms: i64,
    /// Whether the countdown is advancing.
    pub running: bool,
    /// Wall-clock time since the run started, excluding pauses.
    pub total_elapsed_ms: i64,
    /// Wall-clock anchor for `total_elapsed_ms`.
    pub run_start_epoch_ms: i64,
    /// Wall-clock anchor for the current phase.
    pub phase_start_epoch_ms: i64,
    /// Remaining time at `phase_start_epoch_ms`.
    pub phase_initial_ms: i64,
}

impl TimerState {
    /// A stopped timer at the start of cycle 1.
    #[must_use]
    pub const fn new(work_duration_ms: i64) -> Self {
        Self {
            phase: Phase::Work,
            current_cycle: 1,
            remaining_ms: work_duration_ms,
            running: false,
            total_elapsed_ms: 0,
            run_start_epoch_ms: 0,
            phase_start_epoch_ms: 0,
            phase_initial_ms: 0,
        }
    }

    /// Remaining time as shown to a user.
    #[must_use]
    pub fn display_remaining_ms(&self) -> i64 {
        self.remaining_ms.max(0)
    }

    /// Point both phase anchors at the start of a new phase.
    pub(crate) fn anchor_phase(&mut self, start_epoch_ms: i64, initial_ms: i64) {
        self.phase_start_epoch_ms = start_epoch_ms;
        self.phase_initial_ms = initial_ms;
        self.remaining_ms = initial_ms;
    }

    /// Wall-clock time at which the current phase hits zero.
    #[must_use]
    pub const fn phase_end_epoch_ms(&self) -> i64 {
        self.phase_start_epoch_ms.saturating_add(self.phase_initial_ms)
    }

    /// Recompute remaining and elapsed time for `now`.
    pub(crate) fn sync(&mut self, now: i64) {
        let in_phase = now.saturating_sub(self.phase_start_epoch_ms);
        self.remaining_ms = self.phase_initial_ms.saturating_sub(in_phase);
        let elapsed = now.saturating_sub(self.run_start_epoch_ms);
        self.total_elapsed_ms = elapsed.max(0);
    }
}
