//! The settings form.
//!
//! Fields hold raw text while being edited, so a user can clear a field and
//! type a new value. Leaving a field commits it. The form carries the fields
//! of every timer kind; only those of the selected kind are shown.

use serde::{Deserialize, Serialize};

use super::{TimerMode, TimerSettings};
use crate::core::duration::ms_to_minutes_seconds;
use crate::core::minutes_seconds_to_ms;
use crate::features::engine::{TimerKind, TimerProfile};
use crate::features::pomodoro::PomodoroSettings;
use crate::features::simple::CountdownSettings;

/// Largest value any field accepts.
pub const MAX_FIELD_VALUE: i64 = 99_999;

/// An editable numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// Work phase minutes.
    WorkMinutes,
    /// Work phase seconds.
    WorkSeconds,
    /// Rest phase minutes.
    RestMinutes,
    /// Rest phase seconds.
    RestSeconds,
    /// Number of cycles.
    Cycles,
    /// Total run minutes.
    TotalMinutes,
    /// Total run seconds.
    TotalSeconds,
    /// Pomodoro work session minutes.
    FocusMinutes,
    /// Pomodoro work session seconds.
    FocusSeconds,
    /// Short break minutes.
    ShortBreakMinutes,
    /// Short break seconds.
    ShortBreakSeconds,
    /// Long break minutes.
    LongBreakMinutes,
    /// Long break seconds.
    LongBreakSeconds,
    /// Sessions before a long break.
    SessionsUntilLongBreak,
    /// Plain countdown minutes.
    CountdownMinutes,
    /// Plain countdown seconds.
    CountdownSeconds,
}

const FIELD_COUNT: usize = 16;

impl FormField {
    /// All fields in display order.
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::WorkMinutes,
        Self::WorkSeconds,
        Self::RestMinutes,
        Self::RestSeconds,
        Self::Cycles,
        Self::TotalMinutes,
        Self::TotalSeconds,
        Self::FocusMinutes,
        Self::FocusSeconds,
        Self::ShortBreakMinutes,
        Self::ShortBreakSeconds,
        Self::LongBreakMinutes,
        Self::LongBreakSeconds,
        Self::SessionsUntilLongBreak,
        Self::CountdownMinutes,
        Self::CountdownSeconds,
    ];

    /// Interval timer fields.
    pub const INTERVAL: [Self; 7] = [
        Self::WorkMinutes,
        Self::WorkSeconds,
        Self::RestMinutes,
        Self::RestSeconds,
        Self::Cycles,
        Self::TotalMinutes,
        Self::TotalSeconds,
    ];

    /// Pomodoro fields.
    pub const POMODORO: [Self; 7] = [
        Self::FocusMinutes,
        Self::FocusSeconds,
        Self::ShortBreakMinutes,
        Self::ShortBreakSeconds,
        Self::LongBreakMinutes,
        Self::LongBreakSeconds,
        Self::SessionsUntilLongBreak,
    ];

    /// Plain countdown fields.
    pub const COUNTDOWN: [Self; 2] = [Self::CountdownMinutes, Self::CountdownSeconds];

    /// Fields shown for `kind`, in display order.
    #[must_use]
    pub const fn for_kind(kind: TimerKind) -> &'static [Self] {
        match kind {
            TimerKind::Interval => &Self::INTERVAL,
            TimerKind::Pomodoro => &Self::POMODORO,
            TimerKind::Countdown => &Self::COUNTDOWN,
            TimerKind::Stopwatch => &[],
        }
    }

    /// Smallest accepted value.
    #[must_use]
    pub const fn minimum(&self) -> i64 {
        match self {
            Self::Cycles | Self::SessionsUntilLongBreak => 1,
            _ => 0,
        }
    }

    /// Largest accepted value.
    #[must_use]
    pub const fn maximum(&self) -> i64 {
        match self {
            Self::CountdownMinutes | Self::CountdownSeconds => 59,
            _ => MAX_FIELD_VALUE,
        }
    }

    /// Get display label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::WorkMinutes | Self::FocusMinutes => "Work (min)",
            Self::WorkSeconds | Self::FocusSeconds => "Work (sec)",
            Self::RestMinutes => "Rest (min)",
            Self::RestSeconds => "Rest (sec)",
            Self::Cycles => "Cycles",
            Self::TotalMinutes => "Total (min)",
            Self::TotalSeconds => "Total (sec)",
            Self::ShortBreakMinutes => "Short (min)",
            Self::ShortBreakSeconds => "Short (sec)",
            Self::LongBreakMinutes => "Long (min)",
            Self::LongBreakSeconds => "Long (sec)",
            Self::SessionsUntilLongBreak => "Long every",
            Self::CountdownMinutes => "Minutes",
            Self::CountdownSeconds => "Seconds",
        }
    }

    /// Whether the field matters in the given interval mode.
    #[must_use]
    pub const fn applies_to(&self, mode: TimerMode) -> bool {
        match self {
            Self::Cycles => matches!(mode, TimerMode::Cycles),
            Self::TotalMinutes | Self::TotalSeconds => matches!(mode, TimerMode::TotalTime),
            _ => true,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Coerce raw input to an integer in `minimum..=maximum`.
///
/// Empty or non-numeric text becomes `minimum`. Otherwise the leading integer
/// is used (`"12abc"` is 12) and clamped. Digits too long for an `i64` count
/// as `maximum`.
#[must_use]
pub fn coerce_input(text: &str, minimum: i64, maximum: i64) -> i64 {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return minimum;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(minimum, maximum.max(minimum))
}

/// Raw text for every field plus the committed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    inputs: [String; FIELD_COUNT],
    values: [i64; FIELD_COUNT],
    mode: TimerMode,
    kind: TimerKind,
    base: TimerProfile,
}

impl SettingsForm {
    /// Build a form showing `profile`.
    #[must_use]
    pub fn from_profile(profile: &TimerProfile) -> Self {
        let interval = &profile.interval;
        let pomodoro = &profile.pomodoro;
        let (work_min, work_sec) = ms_to_minutes_seconds(interval.work_duration_ms);
        let (rest_min, rest_sec) = ms_to_minutes_seconds(interval.rest_duration_ms);
        let (total_min, total_sec) = ms_to_minutes_seconds(interval.total_duration_ms);
        let (focus_min, focus_sec) = ms_to_minutes_seconds(pomodoro.work_duration_ms);
        let (short_min, short_sec) = ms_to_minutes_seconds(pomodoro.short_break_ms);
        let (long_min, long_sec) = ms_to_minutes_seconds(pomodoro.long_break_ms);
        let (countdown_min, countdown_sec) =
            ms_to_minutes_seconds(profile.countdown.duration_ms);
        let values = [
            work_min,
            work_sec,
            rest_min,
            rest_sec,
            i64::from(interval.cycle_count),
            total_min,
            total_sec,
            focus_min,
            focus_sec,
            short_min,
            short_sec,
            long_min,
            long_sec,
            i64::from(pomodoro.sessions_until_long_break),
            countdown_min,
            countdown_sec,
        ];

        Self {
            inputs: values.map(|v| v.to_string()),
            values,
            mode: interval.mode,
            kind: profile.kind,
            base: *profile,
        }
    }

    /// Raw text of a field.
    #[must_use]
    pub fn input(&self, field: FormField) -> &str {
        &self.inputs[field.index()]
    }

    /// Committed value of a field.
    #[must_use]
    pub const fn value(&self, field: FormField) -> i64 {
        self.values[field.index()]
    }

    /// Active interval mode.
    #[must_use]
    pub const fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Selected timer kind.
    #[must_use]
    pub const fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Fields of the selected kind.
    #[must_use]
    pub const fn fields(&self) -> &'static [FormField] {
        FormField::for_kind(self.kind)
    }

    /// Replace the raw text of a field. Empty text is allowed.
    pub fn edit(&mut self, field: FormField, text: impl Into<String>) {
        self.inputs[field.index()] = text.into();
    }

    /// Append a character to a field.
    pub fn push_char(&mut self, field: FormField, c: char) {
        self.inputs[field.index()].push(c);
    }

    /// Remove the last character of a field.
    pub fn pop_char(&mut self, field: FormField) {
        self.inputs[field.index()].pop();
    }

    /// Validate a field's text and store the result.
    ///
    /// The raw text is rewritten to show the validated value.
    pub fn commit(&mut self, field: FormField) -> i64 {
        let value = coerce_input(self.input(field), field.minimum(), field.maximum());
        self.values[field.index()] = value;
        self.inputs[field.index()] = value.to_string();
        value
    }

    /// Switch interval mode.
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
    }

    /// Switch timer kind.
    pub fn set_kind(&mut self, kind: TimerKind) {
        self.kind = kind;
    }

    /// Interval settings built from the committed values.
    #[must_use]
    pub fn settings(&self) -> TimerSettings {
        let v = |field: FormField| self.value(field);
        let ms = |minutes: FormField, seconds: FormField| {
            minutes_seconds_to_ms(v(minutes), v(seconds))
        };
        TimerSettings {
            work_duration_ms: ms(FormField::WorkMinutes, FormField::WorkSeconds),
            rest_duration_ms: ms(FormField::RestMinutes, FormField::RestSeconds),
            cycle_count: u32::try_from(v(FormField::Cycles)).unwrap_or(u32::MAX),
            total_duration_ms: ms(FormField::TotalMinutes, FormField::TotalSeconds),
            mode: self.mode,
        }
        .sanitized()
    }

    /// Pomodoro settings built from the committed values.
    #[must_use]
    pub fn pomodoro_settings(&self) -> PomodoroSettings {
        let v = |field: FormField| self.value(field);
        let ms = |minutes: FormField, seconds: FormField| {
            minutes_seconds_to_ms(v(minutes), v(seconds))
        };
        PomodoroSettings {
            work_duration_ms: ms(FormField::FocusMinutes, FormField::FocusSeconds),
            short_break_ms: ms(FormField::ShortBreakMinutes, FormField::ShortBreakSeconds),
            long_break_ms: ms(FormField::LongBreakMinutes, FormField::LongBreakSeconds),
            sessions_until_long_break: u32::try_from(v(FormField::SessionsUntilLongBreak))
                .unwrap_or(u32::MAX),
            ..self.base.pomodoro
        }
        .sanitized()
    }

    /// Plain countdown settings built from the committed values.
    #[must_use]
    pub fn countdown_settings(&self) -> CountdownSettings {
        CountdownSettings::new(minutes_seconds_to_ms(
            self.value(FormField::CountdownMinutes),
            self.value(FormField::CountdownSeconds),
        ))
        .sanitized()
    }

    /// Settings for every kind, with the selected kind.
    #[must_use]
    pub fn profile(&self) -> TimerProfile {
        TimerProfile {
            kind: self.kind,
            interval: self.settings(),
            pomodoro: self.pomodoro_settings(),
            countdown: self.countdown_settings(),
        }
    }
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_profile(&TimerProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MAX_DURATION_MS;

    #[test]
    fn test_coerce_input() {
        let max = MAX_FIELD_VALUE;
        assert_eq!(coerce_input("25", 0, max), 25);
        assert_eq!(coerce_input(" 7 ", 0, max), 7);
        assert_eq!(coerce_input("12abc", 0, max), 12);
        assert_eq!(coerce_input("", 0, max), 0);
        assert_eq!(coerce_input("", 1, max), 1);
        assert_eq!(coerce_input("abc", 1, max), 1);
        assert_eq!(coerce_input("-5", 0, max), 0);
        assert_eq!(coerce_input("-5", 1, max), 1);
        assert_eq!(coerce_input("0", 1, max), 1);
        assert_eq!(coerce_input("+3", 0, max), 3);
        assert_eq!(coerce_input("75", 0, 59), 59);
    }

    #[test]
    fn test_default_form_matches_default_settings() {
        let form = SettingsForm::default();
        assert_eq!(form.input(FormField::WorkMinutes), "1");
        assert_eq!(form.input(FormField::WorkSeconds), "0");
        assert_eq!(form.input(FormField::RestSeconds), "15");
        assert_eq!(form.input(FormField::Cycles), "20");
        assert_eq!(form.settings(), TimerSettings::default());
        assert_eq!(form.profile(), TimerProfile::default());
    }

    #[test]
    fn test_edit_allows_empty_until_commit() {
        let mut form = SettingsForm::default();
        form.edit(FormField::Cycles, "");
        assert_eq!(form.input(FormField::Cycles), "");
        // Not committed yet, settings unchanged.
        assert_eq!(form.settings().cycle_count, 20);

        assert_eq!(form.commit(FormField::Cycles), 1);
        assert_eq!(form.input(FormField::Cycles), "1");
        assert_eq!(form.settings().cycle_count, 1);
    }

    #[test]
    fn test_commit_builds_settings() {
        let mut form = SettingsForm::default();
        form.edit(FormField::WorkMinutes, "2");
        form.edit(FormField::WorkSeconds, "30");
        form.edit(FormField::RestMinutes, "-1");
        form.commit(FormField::WorkMinutes);
        form.commit(FormField::WorkSeconds);
        form.commit(FormField::RestMinutes);

        let settings = form.settings();
        assert_eq!(settings.work_duration_ms, 150_000);
        assert_eq!(settings.rest_duration_ms, 15_000);
        assert_eq!(form.input(FormField::RestMinutes), "0");
    }

    #[test]
    fn test_push_pop_char() {
        let mut form = SettingsForm::default();
        form.edit(FormField::TotalMinutes, "");
        form.push_char(FormField::TotalMinutes, '4');
        form.push_char(FormField::TotalMinutes, '5');
        form.pop_char(FormField::TotalMinutes);
        form.commit(FormField::TotalMinutes);
        assert_eq!(form.value(FormField::TotalMinutes), 4);
    }

    #[test]
    fn test_mode_and_applicable_fields() {
        let mut form = SettingsForm::default();
        form.set_mode(TimerMode::TotalTime);
        assert_eq!(form.settings().mode, TimerMode::TotalTime);
        assert!(FormField::TotalMinutes.applies_to(TimerMode::TotalTime));
        assert!(!FormField::Cycles.applies_to(TimerMode::TotalTime));
        assert!(FormField::WorkSeconds.applies_to(TimerMode::Cycles));
    }

    #[test]
    fn test_huge_input_is_capped() {
        let mut form = SettingsForm::default();
        form.edit(FormField::WorkMinutes, "999999999999999999");
        assert_eq!(form.commit(FormField::WorkMinutes), MAX_FIELD_VALUE);
        assert_eq!(form.settings().work_duration_ms, MAX_DURATION_MS);

        form.edit(FormField::Cycles, "99999999999999999999999999");
        assert_eq!(form.commit(FormField::Cycles), MAX_FIELD_VALUE);
        assert_eq!(form.settings().cycle_count, 99_999);

        form.edit(FormField::TotalSeconds, "-99999999999999999999999999");
        assert_eq!(form.commit(FormField::TotalSeconds), 0);
    }

    #[test]
    fn test_fields_per_kind() {
        let mut form = SettingsForm::default();
        assert_eq!(form.fields(), &FormField::INTERVAL);
        form.set_kind(TimerKind::Pomodoro);
        assert_eq!(form.fields().len(), 7);
        assert!(form.fields().contains(&FormField::SessionsUntilLongBreak));
        form.set_kind(TimerKind::Stopwatch);
        assert!(form.fields().is_empty());
        assert_eq!(form.profile().kind, TimerKind::Stopwatch);
    }

    #[test]
    fn test_pomodoro_fields_build_settings() {
        let mut form = SettingsForm::default();
        assert_eq!(form.input(FormField::FocusMinutes), "25");
        assert_eq!(form.input(FormField::LongBreakMinutes), "15");
        assert_eq!(form.pomodoro_settings(), PomodoroSettings::default());

        form.edit(FormField::SessionsUntilLongBreak, "0");
        form.commit(FormField::SessionsUntilLongBreak);
        form.edit(FormField::ShortBreakSeconds, "30");
        form.commit(FormField::ShortBreakSeconds);
        let settings = form.pomodoro_settings();
        assert_eq!(settings.sessions_until_long_break, 1);
        assert_eq!(settings.short_break_ms, 330_000);
    }

    #[test]
    fn test_countdown_fields_clamp_to_an_hour() {
        let mut form = SettingsForm::default();
        assert_eq!(form.countdown_settings(), CountdownSettings::default());
        form.edit(FormField::CountdownMinutes, "90");
        form.edit(FormField::CountdownSeconds, "75");
        form.commit(FormField::CountdownMinutes);
        form.commit(FormField::CountdownSeconds);
        assert_eq!(form.input(FormField::CountdownSeconds), "59");
        assert_eq!(form.countdown_settings().duration_ms, 3_599_000);
    }
}
