//! Timer configuration.

use serde::{Deserialize, Serialize};

use crate::core::{minutes_seconds_to_ms, MAX_DURATION_MS};

/// Which stop condition ends a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerMode {
    /// Stop after a fixed number of work/rest cycles.
    #[default]
    Cycles,
    /// Stop once a fixed amount of wall-clock time has elapsed.
    TotalTime,
}

impl TimerMode {
    /// Get display name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Cycles => "Cycles",
            Self::TotalTime => "Total Time",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Cycles => Self::TotalTime,
            Self::TotalTime => Self::Cycles,
        }
    }
}

impl std::fmt::Display for TimerMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Durations and stop condition for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    /// Length of a work phase in milliseconds.
    pub work_duration_ms: i64,
    /// Length of a rest phase in milliseconds.
    pub rest_duration_ms: i64,
    /// Number of cycles in [`TimerMode::Cycles`].
    pub cycle_count: u32,
    /// Run length in [`TimerMode::TotalTime`].
    pub total_duration_ms: i64,
    /// Active stop condition.
    pub mode: TimerMode,
}

impl TimerSettings {
    /// Settings for a fixed number of cycles.
    #[must_use]
    pub const fn cycles(work_duration_ms: i64, rest_duration_ms: i64, cycle_count: u32) -> Self {
        Self {
            work_duration_ms,
            rest_duration_ms,
            cycle_count,
            total_duration_ms: DEFAULT_TOTAL_MS,
            mode: TimerMode::Cycles,
        }
    }

    /// Settings for a fixed total run time.
    #[must_use]
    pub const fn total_time(
        work_duration_ms: i64,
        rest_duration_ms: i64,
        total_duration_ms: i64,
    ) -> Self {
        Self {
            work_duration_ms,
            rest_duration_ms,
            cycle_count: DEFAULT_CYCLES,
            total_duration_ms,
            mode: TimerMode::TotalTime,
        }
    }

    /// Clamp every field into its valid range.
    ///
    /// Durations lie in `0..=MAX_DURATION_MS` and the cycle count is at
    /// least 1.
    #[must_use]
    pub fn sanitized(self) -> Self {
        Self {
            work_duration_ms: clamp_duration(self.work_duration_ms),
            rest_duration_ms: clamp_duration(self.rest_duration_ms),
            cycle_count: self.cycle_count.max(1),
            total_duration_ms: clamp_duration(self.total_duration_ms),
            mode: self.mode,
        }
    }

    /// Duration of the given phase.
    #[must_use]
    pub const fn phase_duration_ms(&self, phase: super::Phase) -> i64 {
        match phase {
            super::Phase::Work => self.work_duration_ms,
            super::Phase::Rest | super::Phase::ShortBreak | super::Phase::LongBreak => {
                self.rest_duration_ms
            }
        }
    }
}

/// Clamp a duration into `0..=MAX_DURATION_MS`.
#[must_use]
pub const fn clamp_duration(ms: i64) -> i64 {
    if ms < 0 {
        0
    } else if ms > MAX_DURATION_MS {
        MAX_DURATION_MS
    } else {
        ms
    }
}

const DEFAULT_CYCLES: u32 = 20;
const DEFAULT_TOTAL_MS: i64 = minutes_seconds_to_ms(20, 0);

impl Default for TimerSettings {
    /// One minute of work, fifteen seconds of rest, twenty cycles.
    fn default() -> Self {
        Self {
            work_duration_ms: minutes_seconds_to_ms(1, 0),
            rest_duration_ms: minutes_seconds_to_ms(0, 15),
            cycle_count: DEFAULT_CYCLES,
            total_duration_ms: DEFAULT_TOTAL_MS,
            mode: TimerMode::Cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::countdown::Phase;

    #[test]
    fn test_defaults() {
        let settings = TimerSettings::default();
        assert_eq!(settings.work_duration_ms, 60_000);
        assert_eq!(settings.rest_duration_ms, 15_000);
        assert_eq!(settings.cycle_count, 20);
        assert_eq!(settings.total_duration_ms, 1_200_000);
        assert_eq!(settings.mode, TimerMode::Cycles);
    }

    #[test]
    fn test_sanitized_clamps() {
        let settings = TimerSettings {
            work_duration_ms: -5,
            rest_duration_ms: -1,
            cycle_count: 0,
            total_duration_ms: -100,
            mode: TimerMode::TotalTime,
        }
        .sanitized();

        assert_eq!(settings.work_duration_ms, 0);
        assert_eq!(settings.rest_duration_ms, 0);
        assert_eq!(settings.cycle_count, 1);
        assert_eq!(settings.total_duration_ms, 0);
        assert_eq!(settings.mode, TimerMode::TotalTime);
    }

    #[test]
    fn test_sanitized_caps_huge_durations() {
        let settings = TimerSettings::cycles(3_600_000_000_000_000_000, i64::MAX, 2).sanitized();
        assert_eq!(settings.work_duration_ms, MAX_DURATION_MS);
        assert_eq!(settings.rest_duration_ms, MAX_DURATION_MS);
    }

    #[test]
    fn test_phase_duration() {
        let settings = TimerSettings::cycles(1_000, 500, 2);
        assert_eq!(settings.phase_duration_ms(Phase::Work), 1_000);
        assert_eq!(settings.phase_duration_ms(Phase::Rest), 500);
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(
            serde_json::to_string(&TimerMode::TotalTime).unwrap(),
            "\"total-time\""
        );
        let mode: TimerMode = serde_json::from_str("\"cycles\"").unwrap();
        assert_eq!(mode, TimerMode::Cycles);
        assert_eq!(TimerMode::Cycles.toggled(), TimerMode::TotalTime);
    }
}
