//! JSON output formatting for ttimer.

use serde::Serialize;
use serde_json::json;

use crate::error::TimerError;
use crate::features::countdown::TimerEvent;
use crate::features::engine::TimerSnapshot;
use crate::features::preview::SchedulePreview;

/// Format an event as a single JSON line.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_event_json(event: &TimerEvent) -> Result<String, TimerError> {
    Ok(serde_json::to_string(event)?)
}

/// Format a timer snapshot as JSON.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_status_json(snapshot: &TimerSnapshot) -> Result<String, TimerError> {
    to_json(snapshot)
}

/// Format a schedule preview as JSON.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn format_preview_json(preview: &SchedulePreview) -> Result<String, TimerError> {
    let output = json!({
        "kind": preview.kind,
        "mode": preview.mode,
        "count": preview.phases.len(),
        "total_ms": preview.total_ms,
        "truncated": preview.truncated,
        "items": preview.phases,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Helper to serialize any value to pretty JSON.
///
/// # Errors
///
/// Returns `TimerError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TimerError> {
    Ok(serde_json::to_string_pretty(value)?)
}
