use std::collections::VecDeque;
use std::io::Write;

use tracing::trace;

use super::{AlertPattern, Notifier};
use crate::error::TimerError;

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell once per pulse.
pub struct BellNotifier<W: Write> {
    out: W,
    due: VecDeque<i64>,
}

impl<W: Write> BellNotifier<W> {
    /// Create a notifier writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out,
            due: VecDeque::new(),
        }
    }

    /// Consume the notifier and return its writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for BellNotifier<W> {
    fn notify(&mut self, now_ms: i64, pattern: &AlertPattern) {
        // A new alert replaces pulses still queued from an earlier one.
        self.due.clear();
        self.due.extend(pattern.offsets().map(|offset| now_ms + offset));
    }

    fn pump(&mut self, now_ms: i64) -> Result<(), TimerError> {
        let mut rang = false;
        while self.due.front().is_some_and(|&at| at <= now_ms) {
            self.due.pop_front();
            self.out.write_all(BEL)?;
            rang = true;
        }
        if rang {
            self.out.flush()?;
            trace!(remaining = self.due.len(), "bell pulse");
        }
        Ok(())
    }

    fn is_pending(&self) -> bool {
        !self.due.is_empty()
    }

    fn cancel(&mut self) {
        self.due.clear();
    }
}

/// Drops every alert.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&mut self, _now_ms: i64, _pattern: &AlertPattern) {}

    fn pump(&mut self, _now_ms: i64) -> Result<(), TimerError> {
        Ok(())
    }

    fn is_pending(&self) -> bool {
        false
    }

    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bell_pulses_follow_pattern() {
        let mut bell = BellNotifier::new(Vec::new());
        bell.notify(1_000, &AlertPattern::triple());
        assert!(bell.is_pending());

        bell.pump(1_000).unwrap();
        bell.pump(1_299).unwrap();
        bell.pump(1_300).unwrap();
        assert!(bell.is_pending());

        bell.pump(2_000).unwrap();
        assert!(!bell.is_pending());
        assert_eq!(bell.into_inner(), b"\x07\x07\x07".to_vec());
    }

    #[test]
    fn test_nothing_rings_before_due() {
        let mut bell = BellNotifier::new(Vec::new());
        bell.notify(500, &AlertPattern::triple());
        bell.pump(499).unwrap();
        assert_eq!(bell.into_inner(), Vec::<u8>::new());
    }

    #[test]
    fn test_new_alert_replaces_queue() {
        let mut bell = BellNotifier::new(Vec::new());
        bell.notify(0, &AlertPattern::triple());
        bell.pump(0).unwrap();
        bell.notify(100, &AlertPattern::triple());
        bell.pump(10_000).unwrap();
        // One pulse from the first alert, three from the second.
        assert_eq!(bell.into_inner().len(), 4);
    }

    #[test]
    fn test_cancel_stops_alarm() {
        let mut bell = BellNotifier::new(Vec::new());
        bell.notify(0, &AlertPattern::alarm());
        bell.pump(2_500).unwrap();
        bell.cancel();
        assert!(!bell.is_pending());
        bell.pump(60_000).unwrap();
        assert_eq!(bell.into_inner().len(), 3);
    }

    #[test]
    fn test_silent_notifier() {
        let mut silent = SilentNotifier;
        silent.notify(0, &AlertPattern::triple());
        assert!(silent.pump(1_000).is_ok());
        assert!(!silent.is_pending());
    }
}
