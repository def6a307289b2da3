use serde::{Deserialize, Serialize};

/// A sequence of short identical pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPattern {
    /// Number of pulses.
    pub pulses: u32,
    /// Delay between the start of consecutive pulses in milliseconds.
    pub gap_ms: i64,
    /// Tone frequency for notifiers that can synthesize one.
    pub frequency_hz: u32,
    /// Length of a single pulse in milliseconds.
    pub pulse_ms: i64,
}

impl AlertPattern {
    /// Three 1 kHz pulses, 300 ms apart.
    #[must_use]
    pub const fn triple() -> Self {
        Self {
            pulses: 3,
            gap_ms: 300,
            frequency_hz: 1000,
            pulse_ms: 300,
        }
    }

    /// The end-of-countdown alarm: one 800 Hz beep a second for 30 seconds.
    #[must_use]
    pub const fn alarm() -> Self {
        Self {
            pulses: 30,
            gap_ms: 1000,
            frequency_hz: 800,
            pulse_ms: 500,
        }
    }

    /// Start offsets of each pulse relative to the alert.
    pub fn offsets(&self) -> impl Iterator<Item = i64> + '_ {
        (0..i64::from(self.pulses)).map(move |i| i * self.gap_ms)
    }

    /// Time from the first pulse starting to the last one ending.
    #[must_use]
    pub fn span_ms(&self) -> i64 {
        if self.pulses == 0 {
            return 0;
        }
        i64::from(self.pulses - 1) * self.gap_ms + self.pulse_ms
    }
}

impl Default for AlertPattern {
    fn default() -> Self {
        Self::triple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triple_offsets() {
        let pattern = AlertPattern::triple();
        let offsets: Vec<i64> = pattern.offsets().collect();
        assert_eq!(offsets, vec![0, 300, 600]);
        assert_eq!(pattern.span_ms(), 900);
    }

    #[test]
    fn test_alarm_lasts_thirty_seconds() {
        let pattern = AlertPattern::alarm();
        assert_eq!(pattern.offsets().count(), 30);
        assert_eq!(pattern.offsets().last(), Some(29_000));
        assert_eq!(pattern.span_ms(), 29_500);
    }

    #[test]
    fn test_empty_pattern() {
        let pattern = AlertPattern {
            pulses: 0,
            ..AlertPattern::triple()
        };
        assert_eq!(pattern.offsets().count(), 0);
        assert_eq!(pattern.span_ms(), 0);
    }
}
