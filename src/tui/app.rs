//! Application state for the TUI.

use std::time::Duration;

use tracing::debug;

use crate::core::{Clock, SystemClock};
use crate::error::TimerError;
use crate::features::countdown::{FormField, SettingsForm, TimerDriver, TimerEvent};
use crate::features::engine::{AnyTimer, TimerEngine, TimerKind, TimerProfile};

/// Keyboard poll interval while nothing is scheduled sooner.
const IDLE_POLL_MS: u64 = 100;

/// Shorter poll interval while alert pulses are queued.
const ALERT_POLL_MS: u64 = 20;

/// Help text shown on `?`.
pub const HELP: &str = "space:start/pause | r:reset | s:skip | t:timer | m:mode | x:silence | \
                        e:settings | j/k:field | q:quit";

/// Application state.
pub struct App<C: Clock + Clone = SystemClock> {
    /// The running timer.
    pub driver: TimerDriver<AnyTimer<C>>,
    /// Settings being edited.
    pub form: SettingsForm,
    /// Whether the settings panel is open.
    pub show_settings: bool,
    /// Field with the cursor.
    pub selected: FormField,
    /// The countdown flashes until this instant.
    pub flash_until_ms: Option<i64>,
    /// Status message to display.
    pub status: Option<String>,
}

impl<C: Clock + Clone> App<C> {
    /// Create a new app around a driver. The form starts from `profile`.
    pub fn new(driver: TimerDriver<AnyTimer<C>>, profile: &TimerProfile) -> Self {
        let mut form = SettingsForm::from_profile(profile);
        form.set_kind(driver.timer().kind());
        let selected = first_field(&form);
        Self {
            driver,
            form,
            show_settings: false,
            selected,
            flash_until_ms: None,
            status: Some("Press space to start, ? for help".to_string()),
        }
    }

    /// Now, from the timer's clock.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.driver.timer().now_ms()
    }

    /// How long to wait for input before the next tick.
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        let cap = if self.driver.alerts_pending() {
            Duration::from_millis(ALERT_POLL_MS)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };
        self.driver
            .time_until_next_tick()
            .map_or(cap, |wait| wait.min(cap))
    }

    /// Run a due tick and play due alert pulses.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert cannot be written.
    pub fn on_tick(&mut self) -> Result<(), TimerError> {
        let events = self.driver.poll();
        self.absorb(&events);
        self.driver.pump_alerts()
    }

    /// Whether the countdown should be drawn highlighted.
    #[must_use]
    pub fn is_flashing(&self) -> bool {
        self.flash_until_ms.is_some_and(|until| self.now_ms() < until)
    }

    /// Start or pause.
    pub fn toggle(&mut self) {
        let events = self.driver.toggle();
        self.absorb(&events);
        if self.driver.timer().is_complete() {
            return;
        }
        self.status = Some(if self.driver.timer().is_running() {
            "Running".to_string()
        } else {
            "Paused".to_string()
        });
    }

    /// Stop and rewind.
    pub fn reset(&mut self) {
        let events = self.driver.reset();
        self.absorb(&events);
        self.flash_until_ms = None;
        self.status = Some("Reset".to_string());
    }

    /// Skip the current phase.
    pub fn skip(&mut self) {
        let events = self.driver.skip_phase();
        self.absorb(&events);
    }

    /// Stop the alarm and the flash.
    pub fn silence(&mut self) {
        self.driver.silence();
        self.flash_until_ms = None;
        self.status = Some("Alarm silenced".to_string());
    }

    /// Switch to the next timer kind. The old timer is stopped.
    pub fn switch_kind(&mut self) {
        self.commit_field();
        let kind = self.form.kind().next();
        self.form.set_kind(kind);

        let clock = self.driver.timer().clock().clone();
        let timer = AnyTimer::build(kind, &self.form.profile(), clock);
        let events = self.driver.replace(timer);
        self.absorb(&events);

        self.flash_until_ms = None;
        self.selected = first_field(&self.form);
        self.status = Some(format!("Timer: {kind}"));
    }

    /// Switch between cycles and total-time mode.
    pub fn switch_mode(&mut self) {
        if self.form.kind() != TimerKind::Interval {
            self.status = Some("Mode applies to the interval timer".to_string());
            return;
        }
        self.form.set_mode(self.form.mode().toggled());
        self.apply_form();
        self.status = Some(format!("Mode: {}", self.form.mode().display_name()));
    }

    /// Open or close the settings panel.
    pub fn toggle_settings(&mut self) {
        if self.show_settings {
            self.close_settings();
        } else {
            self.show_settings = true;
            self.status = Some("Editing settings. Enter commits, Esc closes".to_string());
        }
    }

    /// Commit the selected field and close the panel.
    pub fn close_settings(&mut self) {
        self.commit_field();
        self.show_settings = false;
        self.status = None;
    }

    /// Move the cursor to the next field, committing the current one.
    pub fn select_next(&mut self) {
        self.step_field(1);
    }

    /// Move the cursor to the previous field, committing the current one.
    pub fn select_previous(&mut self) {
        let len = self.form.fields().len();
        self.step_field(len.saturating_sub(1));
    }

    /// Type into the selected field.
    pub fn input_char(&mut self, c: char) {
        if self.has_selection() {
            self.form.push_char(self.selected, c);
        }
    }

    /// Delete from the selected field.
    pub fn backspace(&mut self) {
        if self.has_selection() {
            self.form.pop_char(self.selected);
        }
    }

    /// Validate the selected field and apply the form.
    pub fn commit_field(&mut self) {
        if !self.has_selection() {
            return;
        }
        let value = self.form.commit(self.selected);
        debug!(field = ?self.selected, value, "settings field committed");
        self.apply_form();
    }

    fn apply_form(&mut self) {
        let profile = self.form.profile();
        let events = self.driver.update(|timer| {
            timer.configure(&profile);
        });
        self.absorb(&events);
    }

    fn has_selection(&self) -> bool {
        self.form.fields().contains(&self.selected)
    }

    fn step_field(&mut self, step: usize) {
        self.commit_field();
        let fields = self.form.fields();
        if fields.is_empty() {
            return;
        }
        let index = fields
            .iter()
            .position(|field| *field == self.selected)
            .unwrap_or(0);
        self.selected = fields[(index + step) % fields.len()];
    }

    fn absorb(&mut self, events: &[TimerEvent]) {
        let unit = match self.driver.timer().kind() {
            TimerKind::Pomodoro => "session",
            _ => "cycle",
        };
        for event in events {
            match event {
                TimerEvent::Alert { pattern, at_ms } => {
                    self.flash_until_ms = Some((*at_ms).max(self.now_ms()) + pattern.span_ms());
                }
                TimerEvent::PhaseChanged { phase, cycle, .. } => {
                    self.status = Some(format!("{} • {unit} {cycle}", phase.display_name()));
                }
                TimerEvent::Completed { .. } => {
                    self.status = Some("Timer complete. Press r to reset".to_string());
                }
            }
        }
    }

    /// Stop the timer before leaving.
    pub fn shutdown(&mut self) {
        self.driver.shutdown();
    }
}

fn first_field(form: &SettingsForm) -> FormField {
    form.fields().first().copied().unwrap_or(FormField::WorkMinutes)
}
