//! Pomodoro configuration.

use serde::{Deserialize, Serialize};

use crate::core::minutes_seconds_to_ms;
use crate::features::countdown::settings::clamp_duration;
use crate::features::countdown::Phase;

/// Phase lengths and long-break spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PomodoroSettings {
    /// Length of a work session in milliseconds.
    pub work_duration_ms: i64,
    /// Length of a short break in milliseconds.
    pub short_break_ms: i64,
    /// Length of a long break in milliseconds.
    pub long_break_ms: i64,
    /// A long break follows every this many sessions.
    pub sessions_until_long_break: u32,
    /// Start the next phase without waiting for the user.
    pub auto_start: bool,
    /// Stop for good after the break following this session.
    pub session_limit: Option<u32>,
}

impl PomodoroSettings {
    /// Clamp every field into its valid range.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            work_duration_ms: clamp_duration(self.work_duration_ms),
            short_break_ms: clamp_duration(self.short_break_ms),
            long_break_ms: clamp_duration(self.long_break_ms),
            sessions_until_long_break: self.sessions_until_long_break.max(1),
            auto_start: self.auto_start,
            session_limit: self.session_limit.map(|limit| limit.max(1)),
        }
    }

    /// Duration of the given phase.
    #[must_use]
    pub const fn phase_duration_ms(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Work => self.work_duration_ms,
            Phase::LongBreak => self.long_break_ms,
            Phase::Rest | Phase::ShortBreak => self.short_break_ms,
        }
    }

    /// The break that follows work session `session`.
    #[must_use]
    pub fn break_after(&self, session: u32) -> Phase {
        if session % self.sessions_until_long_break.max(1) == 0 {
            Phase::LongBreak
        } else {
            Phase::ShortBreak
        }
    }
}

impl Default for PomodoroSettings {
    /// 25 minutes of work, 5 minute breaks, 15 minutes after every fourth.
    fn default() -> Self {
        Self {
            work_duration_ms: minutes_seconds_to_ms(25, 0),
            short_break_ms: minutes_seconds_to_ms(5, 0),
            long_break_ms: minutes_seconds_to_ms(15, 0),
            sessions_until_long_break: 4,
            auto_start: false,
            session_limit: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PomodoroSettings::default();
        assert_eq!(settings.work_duration_ms, 1_500_000);
        assert_eq!(settings.short_break_ms, 300_000);
        assert_eq!(settings.long_break_ms, 900_000);
        assert_eq!(settings.sessions_until_long_break, 4);
        assert!(!settings.auto_start);
    }

    #[test]
    fn test_long_break_every_nth_session() {
        let settings = PomodoroSettings::default();
        let breaks: Vec<Phase> = (1..=8).map(|s| settings.break_after(s)).collect();
        assert_eq!(
            breaks,
            vec![
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::ShortBreak,
                Phase::LongBreak,
            ]
        );
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = PomodoroSettings {
            work_duration_ms: -1,
            long_break_ms: i64::MAX,
            sessions_until_long_break: 0,
            session_limit: Some(0),
            ..PomodoroSettings::default()
        }
        .sanitized();
        assert_eq!(settings.work_duration_ms, 0);
        assert_eq!(settings.long_break_ms, crate::core::MAX_DURATION_MS);
        assert_eq!(settings.sessions_until_long_break, 1);
        assert_eq!(settings.session_limit, Some(1));
        assert_eq!(settings.break_after(7), Phase::LongBreak);
    }
}
