//! Error types for ttimer.

use thiserror::Error;

/// Errors raised outside the timer state machine.
///
/// The countdown itself never fails; these cover configuration, argument
/// parsing, terminal setup and output.
#[derive(Debug, Error)]
pub enum TimerError {
    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A command-line value could not be interpreted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The terminal could not be set up or drawn to.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TimerError {
    /// Wrap a terminal backend error with a short description of the step.
    pub fn terminal(step: &str, err: impl std::fmt::Display) -> Self {
        Self::Terminal(format!("{step}: {err}"))
    }
}
