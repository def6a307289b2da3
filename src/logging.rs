//! Tracing subscriber setup.
//!
//! The interactive timer owns the terminal, so it logs to a file. Every other
//! command logs to stderr and leaves stdout to its output.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::TimerError;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "TTIMER_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error.
    Stderr,
    /// Append to a file.
    File(PathBuf),
}

/// Pick the filter directive.
///
/// `--verbose` wins, then the environment, then the config file.
#[must_use]
pub fn filter_directive(config: &LoggingConfig, verbose: bool, env: Option<&str>) -> String {
    if verbose {
        return "ttimer=debug".to_string();
    }
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.trim().to_string(),
        _ => config.level.clone(),
    }
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened or a subscriber is
/// already installed.
pub fn init(config: &LoggingConfig, verbose: bool, target: LogTarget) -> Result<(), TimerError> {
    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(config, verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| TimerError::Config(format!("Invalid log filter '{directive}': {e}")))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    let result = match target {
        LogTarget::Stderr => builder.with_writer(std::io::stderr).try_init(),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path).map_err(|e| {
                TimerError::Config(format!("Failed to open log file {}: {e}", path.display()))
            })?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
        }
    };

    result.map_err(|e| TimerError::Config(format!("Failed to initialize logging: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_precedence() {
        let config = LoggingConfig::default();
        assert_eq!(filter_directive(&config, false, None), "warn");
        assert_eq!(filter_directive(&config, false, Some("info")), "info");
        assert_eq!(filter_directive(&config, false, Some("  ")), "warn");
        assert_eq!(filter_directive(&config, true, Some("info")), "ttimer=debug");
    }

    #[test]
    fn test_config_level_used() {
        let config = LoggingConfig {
            level: "ttimer=trace".to_string(),
        };
        assert_eq!(filter_directive(&config, false, None), "ttimer=trace");
    }
}
