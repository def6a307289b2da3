//! Output formatting for ttimer.
//!
//! This module provides formatters for displaying timer state in various formats.

mod json;
mod pretty;
pub mod status;

use crate::cli::args::OutputFormat;
use crate::config::Config;
use crate::error::TimerError;
use crate::features::countdown::TimerEvent;
use crate::features::engine::TimerSnapshot;
use crate::features::preview::SchedulePreview;

pub use json::*;
pub use pretty::*;
pub use status::{cycle_segments, status_line, Segment};

/// Format a timer event based on output format.
///
/// Returns `None` for events that have no line in the chosen format.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_event(
    event: &TimerEvent,
    format: OutputFormat,
) -> Result<Option<String>, TimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_event_pretty(event)),
        OutputFormat::Json => format_event_json(event).map(Some),
    }
}

/// Format a timer snapshot based on output format.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_status(snapshot: &TimerSnapshot, format: OutputFormat) -> Result<String, TimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(snapshot)),
        OutputFormat::Json => format_status_json(snapshot),
    }
}

/// Format a schedule preview based on output format.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_preview(
    preview: &SchedulePreview,
    format: OutputFormat,
) -> Result<String, TimerError> {
    match format {
        OutputFormat::Pretty => Ok(format_preview_pretty(preview)),
        OutputFormat::Json => format_preview_json(preview),
    }
}

/// Format the configuration based on output format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config(config: &Config, format: OutputFormat) -> Result<String, TimerError> {
    match format {
        OutputFormat::Pretty => format_config_pretty(config),
        OutputFormat::Json => to_json(config),
    }
}
