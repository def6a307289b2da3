//! Configuration management for ttimer.
//!
//! This module handles loading and saving configuration from `~/.ttimer/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{AlertConfig, ColorSetting, Config, GeneralConfig, LoggingConfig, TimerConfig};
