//! The work/rest countdown state machine.
//!
//! Remaining time is always derived from wall-clock timestamps:
//! `remaining = phase_initial - (now - phase_start)`. A tick that fires late
//! therefore never biases the countdown, it only shows the correct value a
//! little later.

use tracing::{debug, info};

use super::{Phase, TimerEvent, TimerMode, TimerSettings, TimerState};
use crate::core::{format_countdown, Clock, SystemClock};
use crate::features::alert::AlertPattern;
use crate::features::engine::{TimerEngine, TimerKind, TimerSnapshot};

/// Upper bound on phase transitions processed by a single tick.
///
/// Zero-length phases cascade. In cycles mode the cascade ends on its own;
/// in total-time mode with both phases empty it would not, so anything past
/// this bound is picked up by the following ticks.
const MAX_TRANSITIONS_PER_TICK: u64 = 10_000;

/// A drift-corrected countdown alternating work and rest phases.
#[derive(Debug)]
pub struct CountdownTimer<C: Clock = SystemClock> {
    settings: TimerSettings,
    state: TimerState,
    clock: C,
    outbox: Vec<TimerEvent>,
}

impl CountdownTimer<SystemClock> {
    /// Create a timer driven by the system clock.
    #[must_use]
    pub fn new(settings: TimerSettings) -> Self {
        Self::with_clock(settings, SystemClock)
    }
}

impl<C: Clock> CountdownTimer<C> {
    /// Create a stopped timer at the start of cycle 1.
    #[must_use]
    pub fn with_clock(settings: TimerSettings, clock: C) -> Self {
        let settings = settings.sanitized();
        Self {
            state: TimerState::new(settings.work_duration_ms),
            settings,
            clock,
            outbox: Vec::new(),
        }
    }

    /// Current settings.
    #[must_use]
    pub const fn settings(&self) -> &TimerSettings {
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

    /// Replace the settings.
    ///
    /// A stopped timer picks up the new duration for its current phase right
    /// away. A running timer keeps counting down the current phase and uses
    /// the new durations from the next phase on.
    pub fn configure(&mut self, settings: TimerSettings) {
        self.settings = settings.sanitized();
        if !self.state.running {
            self.state.remaining_ms = self.settings.phase_duration_ms(self.state.phase);
        }
        debug!(settings = ?self.settings, running = self.state.running, "timer configured");
    }

    /// Start or pause.
    ///
    /// Pausing keeps all progress. Resuming continues from the same remaining
    /// time, and elapsed run time does not include the pause. Boundaries
    /// passed since the last tick are settled before pausing, so a run that
    /// ended in the meantime completes instead. Starting a completed run
    /// begins a fresh one.
    pub fn toggle(&mut self) {
        if self.state.running {
            self.tick();
            if !self.state.running {
                return;
            }
            self.state.running = false;
            info!(
                phase = %self.state.phase,
                cycle = self.state.current_cycle,
                remaining_ms = self.state.remaining_ms,
                "timer paused"
            );
        } else {
            if self.is_complete() {
                self.reset();
            }
            let now = self.clock.now_ms();
            self.state.run_start_epoch_ms = now.saturating_sub(self.state.total_elapsed_ms);
            self.state.phase_start_epoch_ms = now;
            self.state.phase_initial_ms = self.state.remaining_ms;
            self.state.running = true;
            info!(
                phase = %self.state.phase,
                cycle = self.state.current_cycle,
                remaining_ms = self.state.remaining_ms,
                mode = %self.settings.mode,
                "timer started"
            );
        }
    }

    /// Stop and rewind to the start of cycle 1.
    pub fn reset(&mut self) {
        self.state = TimerState::new(self.settings.work_duration_ms);
        info!("timer reset");
    }

    /// End the current phase now.
    ///
    /// The next phase starts with its full configured duration.
    pub fn skip_phase(&mut self) {
        if self.is_complete() {
            return;
        }
        let now = self.clock.now_ms();
        if self.state.running {
            self.state.sync(now);
        }
        debug!(phase = %self.state.phase, remaining_ms = self.state.remaining_ms, "phase skipped");
        self.complete_current_phase(now);
    }

    /// Advance the countdown to the current clock time.
    ///
    /// Does nothing while stopped.
    pub fn tick(&mut self) {
        if !self.state.running {
            return;
        }

        let now = self.clock.now_ms();
        self.state.sync(now);

        if self.settings.mode == TimerMode::TotalTime
            && self.state.total_elapsed_ms >= self.settings.total_duration_ms
        {
            self.state.remaining_ms = 0;
            self.outbox.push(TimerEvent::Alert {
                pattern: AlertPattern::triple(),
                at_ms: now,
            });
            self.finish(now);
            return;
        }

        let mut budget = self.transition_budget();
        while self.state.running && self.state.remaining_ms <= 0 && budget > 0 {
            // Anchor the next phase where this one really ended, not at `now`.
            let boundary = self.state.phase_end_epoch_ms();
            self.complete_current_phase(boundary);
            if self.state.running {
                self.state.sync(now);
            }
            budget -= 1;
        }

        if self.state.running && self.state.remaining_ms <= 0 {
            debug!("transition budget exhausted, continuing next tick");
        }
    }

    /// Drain events produced since the last call.
    pub fn take_events(&mut self) -> Vec<TimerEvent> {
        std::mem::take(&mut self.outbox)
    }

    /// Whether the countdown is advancing.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.state.running
    }

    /// Whether the run has reached its stop condition.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        if self.state.running {
            return false;
        }
        match self.settings.mode {
            TimerMode::Cycles => {
                self.state.phase == Phase::Rest
                    && self.state.current_cycle >= self.settings.cycle_count
                    && self.state.remaining_ms <= 0
            }
            TimerMode::TotalTime => {
                self.state.total_elapsed_ms >= self.settings.total_duration_ms
            }
        }
    }

    /// Remaining time in the current phase, never negative.
    #[must_use]
    pub fn remaining_ms(&self) -> i64 {
        self.state.display_remaining_ms()
    }

    /// Remaining time as `MM:SS`.
    #[must_use]
    pub fn format_remaining(&self) -> String {
        format_countdown(self.state.remaining_ms)
    }

    /// Progress through the current phase (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn phase_progress(&self) -> f64 {
        let duration = self.settings.phase_duration_ms(self.state.phase);
        if duration <= 0 {
            return 1.0;
        }
        (1.0 - self.remaining_ms() as f64 / duration as f64).clamp(0.0, 1.0)
    }

    /// Progress through the whole run (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn run_progress(&self) -> f64 {
        match self.settings.mode {
            TimerMode::Cycles => {
                (f64::from(self.state.current_cycle) / f64::from(self.settings.cycle_count))
                    .min(1.0)
            }
            TimerMode::TotalTime => {
                if self.settings.total_duration_ms <= 0 {
                    return 1.0;
                }
                (self.state.total_elapsed_ms as f64 / self.settings.total_duration_ms as f64)
                    .min(1.0)
            }
        }
    }

    /// A serializable view of the timer.
    #[must_use]
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            kind: TimerKind::Interval,
            phase: Some(self.state.phase),
            current_cycle: self.state.current_cycle,
            cycle_count: self.settings.cycle_count,
            mode: Some(self.settings.mode),
            remaining_ms: self.remaining_ms(),
            display: self.format_remaining(),
            total_elapsed_ms: self.state.total_elapsed_ms,
            total_duration_ms: self.settings.total_duration_ms,
            running: self.state.running,
            complete: self.is_complete(),
            run_progress: self.run_progress(),
        }
    }

    /// When the next tick would end the current phase or the run.
    #[must_use]
    pub fn next_deadline_ms(&self) -> Option<i64> {
        if !self.state.running {
            return None;
        }
        let phase_end = self.state.phase_end_epoch_ms();
        Some(match self.settings.mode {
            TimerMode::Cycles => phase_end,
            TimerMode::TotalTime => phase_end.min(
                self.state
                    .run_start_epoch_ms
                    .saturating_add(self.settings.total_duration_ms),
            ),
        })
    }

    /// The single phase-complete transition, shared by ticks and skips.
    ///
    /// `anchor_ms` is the wall-clock start of the next phase.
    fn complete_current_phase(&mut self, anchor_ms: i64) {
        self.outbox.push(TimerEvent::Alert {
            pattern: AlertPattern::triple(),
            at_ms: anchor_ms,
        });

        match self.state.phase {
            Phase::Work => {
                self.state.phase = Phase::Rest;
                self.state.anchor_phase(anchor_ms, self.settings.rest_duration_ms);
                self.announce_phase(anchor_ms);
            }
            Phase::Rest | Phase::ShortBreak | Phase::LongBreak => {
                if self.settings.mode == TimerMode::Cycles
                    && self.state.current_cycle >= self.settings.cycle_count
                {
                    self.state.remaining_ms = 0;
                    self.finish(anchor_ms);
                    return;
                }
                self.state.current_cycle += 1;
                self.state.phase = Phase::Work;
                self.state.anchor_phase(anchor_ms, self.settings.work_duration_ms);
                self.announce_phase(anchor_ms);
            }
        }
    }

    fn announce_phase(&mut self, at_ms: i64) {
        debug!(
            phase = %self.state.phase,
            cycle = self.state.current_cycle,
            remaining_ms = self.state.remaining_ms,
            "phase changed"
        );
        self.outbox.push(TimerEvent::PhaseChanged {
            phase: self.state.phase,
            cycle: self.state.current_cycle,
            duration_ms: self.state.phase_initial_ms,
            at_ms,
        });
    }

    fn finish(&mut self, at_ms: i64) {
        if self.state.running {
            self.state.total_elapsed_ms =
                at_ms.saturating_sub(self.state.run_start_epoch_ms).max(0);
        }
        self.state.running = false;
        info!(
            cycle = self.state.current_cycle,
            total_elapsed_ms = self.state.total_elapsed_ms,
            "timer completed"
        );
        self.outbox.push(TimerEvent::Completed { at_ms });
    }

    fn transition_budget(&self) -> u64 {
        let budget = match self.settings.mode {
            TimerMode::Cycles => 2 * u64::from(self.settings.cycle_count),
            TimerMode::TotalTime
                if self.settings.work_duration_ms == 0 && self.settings.rest_duration_ms == 0 =>
            {
                2
            }
            TimerMode::TotalTime => MAX_TRANSITIONS_PER_TICK,
        };
        budget.min(MAX_TRANSITIONS_PER_TICK)
    }
}

impl<C: Clock> TimerEngine for CountdownTimer<C> {
    fn kind(&self) -> TimerKind {
        TimerKind::Interval
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
        Self::next_deadline_ms(self)
    }
}
