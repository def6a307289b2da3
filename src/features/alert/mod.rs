//! Phase-change alerts.
//!
//! Timers only emit an [`AlertPattern`]. Playing it is up to a
//! [`Notifier`]: the terminal bell, or nothing at all.

mod bell;
mod pattern;

pub use bell::{BellNotifier, SilentNotifier};
pub use pattern::AlertPattern;

use crate::error::TimerError;

/// Something that can play an alert pattern.
///
/// Pulses are spread out over time, so notifiers get a `pump` call on every
/// loop iteration to emit whatever has come due.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    /// Queue an alert starting at `now_ms`.
    fn notify(&mut self, now_ms: i64, pattern: &AlertPattern);

    /// Emit pulses that are due at `now_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    fn pump(&mut self, now_ms: i64) -> Result<(), TimerError>;

    /// Whether pulses are still waiting to be played.
    fn is_pending(&self) -> bool;

    /// Drop every pulse that has not played yet.
    fn cancel(&mut self);
}
