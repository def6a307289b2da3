//! Configuration settings for ttimer.
//!
//! Settings are loaded from `~/.ttimer/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::TimerError;
use crate::features::countdown::{TimerMode, TimerSettings, DEFAULT_TICK_INTERVAL_MS};
use crate::features::engine::{TimerKind, TimerProfile};
use crate::features::pomodoro::PomodoroSettings;
use crate::features::simple::CountdownSettings;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer defaults.
    pub timer: TimerConfig,
    /// Pomodoro defaults.
    pub pomodoro: PomodoroConfig,
    /// Plain countdown defaults.
    pub countdown: CountdownConfig,
    /// Alert settings.
    pub alert: AlertConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Default durations and stop condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimerConfig {
    /// Timer started by the interactive UI and the runner.
    #[serde(default)]
    pub kind: TimerKind,
    /// Work phase length in seconds.
    #[serde(default = "default_work_seconds")]
    pub work_seconds: u32,
    /// Rest phase length in seconds.
    #[serde(default = "default_rest_seconds")]
    pub rest_seconds: u32,
    /// Number of cycles in cycles mode.
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    /// Run length in seconds in total-time mode.
    #[serde(default = "default_total_seconds")]
    pub total_seconds: u32,
    /// Stop condition.
    #[serde(default)]
    pub mode: TimerMode,
    /// Nominal tick cadence in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u32,
}

/// Pomodoro durations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PomodoroConfig {
    /// Work session length in seconds.
    #[serde(default = "default_pomodoro_work_seconds")]
    pub work_seconds: u32,
    /// Short break length in seconds.
    #[serde(default = "default_short_break_seconds")]
    pub short_break_seconds: u32,
    /// Long break length in seconds.
    #[serde(default = "default_long_break_seconds")]
    pub long_break_seconds: u32,
    /// Sessions before a long break.
    #[serde(default = "default_sessions")]
    pub sessions_until_long_break: u32,
}

/// Plain countdown length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CountdownConfig {
    /// Countdown length in seconds.
    #[serde(default = "default_countdown_seconds")]
    pub seconds: u32,
}

/// Alert settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AlertConfig {
    /// Play alerts at phase boundaries.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Ring the terminal bell.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log filter, e.g. `warn` or `ttimer=debug`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_work_seconds() -> u32 {
    60
}

const fn default_rest_seconds() -> u32 {
    15
}

const fn default_cycles() -> u32 {
    20
}

const fn default_total_seconds() -> u32 {
    20 * 60
}

const fn default_pomodoro_work_seconds() -> u32 {
    25 * 60
}

const fn default_short_break_seconds() -> u32 {
    5 * 60
}

const fn default_long_break_seconds() -> u32 {
    15 * 60
}

const fn default_sessions() -> u32 {
    4
}

const fn default_countdown_seconds() -> u32 {
    5 * 60
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn default_tick_interval() -> u32 {
    DEFAULT_TICK_INTERVAL_MS as u32
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            kind: TimerKind::default(),
            work_seconds: default_work_seconds(),
            rest_seconds: default_rest_seconds(),
            cycles: default_cycles(),
            total_seconds: default_total_seconds(),
            mode: TimerMode::default(),
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_seconds: default_pomodoro_work_seconds(),
            short_break_seconds: default_short_break_seconds(),
            long_break_seconds: default_long_break_seconds(),
            sessions_until_long_break: default_sessions(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            seconds: default_countdown_seconds(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            bell: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TimerConfig {
    /// Timer settings described by this section.
    #[must_use]
    pub fn to_settings(&self) -> TimerSettings {
        TimerSettings {
            work_duration_ms: i64::from(self.work_seconds) * 1000,
            rest_duration_ms: i64::from(self.rest_seconds) * 1000,
            cycle_count: self.cycles,
            total_duration_ms: i64::from(self.total_seconds) * 1000,
            mode: self.mode,
        }
        .sanitized()
    }
}

impl PomodoroConfig {
    /// Pomodoro settings described by this section.
    #[must_use]
    pub fn to_settings(&self) -> PomodoroSettings {
        PomodoroSettings {
            work_duration_ms: i64::from(self.work_seconds) * 1000,
            short_break_ms: i64::from(self.short_break_seconds) * 1000,
            long_break_ms: i64::from(self.long_break_seconds) * 1000,
            sessions_until_long_break: self.sessions_until_long_break,
            ..PomodoroSettings::default()
        }
        .sanitized()
    }
}

impl CountdownConfig {
    /// Countdown settings described by this section.
    #[must_use]
    pub fn to_settings(&self) -> CountdownSettings {
        CountdownSettings::new(i64::from(self.seconds) * 1000).sanitized()
    }
}

impl Config {
    /// Settings for every timer kind, with the configured kind selected.
    #[must_use]
    pub fn to_profile(&self) -> TimerProfile {
        TimerProfile {
            kind: self.timer.kind,
            interval: self.timer.to_settings(),
            pomodoro: self.pomodoro.to_settings(),
            countdown: self.countdown.to_settings(),
        }
    }

    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, TimerError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, TimerError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            TimerError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            TimerError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Save configuration to the default path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save(&self) -> Result<(), TimerError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        self.save_to_path(&paths.config_file)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), TimerError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            TimerError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, TimerError> {
        serde_yaml::to_string(self)
            .map_err(|e| TimerError::Config(format!("Failed to serialize config: {e}")))
    }
}
