//! Ties a timer to its tick schedule and notifier.

use std::time::Duration;

use tracing::{debug, trace};

use super::{TickSchedule, TimerEvent};
use crate::error::TimerError;
use crate::features::alert::Notifier;
use crate::features::engine::{AnyTimer, TimerEngine};

/// Owns one timer, its pending tick and the alert notifier.
///
/// Every operation ends in [`TimerDriver::sync_schedule`], the only place the
/// tick is armed or cancelled. Dropping the driver cancels the tick too.
pub struct TimerDriver<T: TimerEngine = AnyTimer> {
    timer: T,
    schedule: TickSchedule,
    notifier: Box<dyn Notifier>,
}

impl<T: TimerEngine> TimerDriver<T> {
    /// Wrap a timer. Ticks fire every `tick_interval_ms` while running.
    pub fn new(timer: T, notifier: Box<dyn Notifier>, tick_interval_ms: i64) -> Self {
        let mut driver = Self {
            timer,
            schedule: TickSchedule::new(tick_interval_ms),
            notifier,
        };
        driver.sync_schedule();
        driver
    }

    /// The wrapped timer.
    #[must_use]
    pub const fn timer(&self) -> &T {
        &self.timer
    }

    /// The tick schedule.
    #[must_use]
    pub const fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    /// Start or pause.
    pub fn toggle(&mut self) -> Vec<TimerEvent> {
        self.timer.toggle();
        self.finish_operation()
    }

    /// Stop and rewind. A ringing alarm stops too.
    pub fn reset(&mut self) -> Vec<TimerEvent> {
        self.timer.reset();
        self.notifier.cancel();
        self.finish_operation()
    }

    /// End the current phase now.
    pub fn skip_phase(&mut self) -> Vec<TimerEvent> {
        self.timer.skip_phase();
        self.finish_operation()
    }

    /// Change the timer in place, e.g. to apply new settings.
    pub fn update<F: FnOnce(&mut T)>(&mut self, change: F) -> Vec<TimerEvent> {
        change(&mut self.timer);
        self.finish_operation()
    }

    /// Swap in a different timer. The old one is stopped and its alarm
    /// silenced.
    pub fn replace(&mut self, timer: T) -> Vec<TimerEvent> {
        self.shutdown();
        self.notifier.cancel();
        self.timer = timer;
        self.finish_operation()
    }

    /// Drop alert pulses that have not played yet.
    pub fn silence(&mut self) {
        if self.notifier.is_pending() {
            debug!("alarm silenced");
        }
        self.notifier.cancel();
    }

    /// Run the pending tick if it is due.
    pub fn poll(&mut self) -> Vec<TimerEvent> {
        let now = self.timer.now_ms();
        if self.schedule.is_due(now) {
            trace!(now, "tick");
            self.timer.tick();
            self.schedule.complete(now);
        }
        self.finish_operation()
    }

    /// Let the notifier play pulses that have come due.
    ///
    /// # Errors
    ///
    /// Returns an error if the notifier cannot write its output.
    pub fn pump_alerts(&mut self) -> Result<(), TimerError> {
        let now = self.timer.now_ms();
        self.notifier.pump(now)
    }

    /// Whether alert pulses are still queued.
    #[must_use]
    pub fn alerts_pending(&self) -> bool {
        self.notifier.is_pending()
    }

    /// Time until the next tick, or `None` when stopped.
    #[must_use]
    pub fn time_until_next_tick(&self) -> Option<Duration> {
        self.schedule.time_until(self.timer.now_ms())
    }

    /// Stop the timer and release the tick.
    pub fn shutdown(&mut self) {
        if self.timer.is_running() {
            self.timer.toggle();
        }
        self.schedule.cancel();
        debug!("timer driver shut down");
    }

    fn finish_operation(&mut self) -> Vec<TimerEvent> {
        self.sync_schedule();

        let events = self.timer.take_events();
        let now = self.timer.now_ms();
        for event in &events {
            if let TimerEvent::Alert { pattern, .. } = event {
                self.notifier.notify(now, pattern);
            }
        }
        events
    }

    /// Arm the tick while running, cancel it otherwise.
    fn sync_schedule(&mut self) {
        if self.timer.is_running() {
            self.schedule.arm(self.timer.now_ms());
        } else if self.schedule.is_armed() {
            self.schedule.cancel();
            trace!("tick cancelled");
        }
    }
}

impl<T: TimerEngine> Drop for TimerDriver<T> {
    fn drop(&mut self) {
        self.schedule.cancel();
    }
}
