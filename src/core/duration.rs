//! Duration parsing and formatting.
//!
//! All countdown arithmetic happens in signed milliseconds. These helpers turn
//! those values into `MM:SS` strings and parse human input like `1m30s`.

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+)\s*(ms|h|m|s)")
        .unwrap_or_else(|e| panic!("Invalid duration token regex: {e}"))
});

/// Longest phase or run length accepted anywhere: 1000 hours.
pub const MAX_DURATION_MS: i64 = 1_000 * 3_600_000;

/// Convert a minutes/seconds pair to milliseconds, saturating at the `i64`
/// range.
#[must_use]
pub const fn minutes_seconds_to_ms(minutes: i64, seconds: i64) -> i64 {
    minutes
        .saturating_mul(60)
        .saturating_add(seconds)
        .saturating_mul(1000)
}

/// Split milliseconds into whole minutes and leftover seconds.
#[must_use]
pub const fn ms_to_minutes_seconds(ms: i64) -> (i64, i64) {
    let total_seconds = ms / 1000;
    (total_seconds / 60, total_seconds % 60)
}

/// Format a countdown value as `MM:SS`.
///
/// Negative values render as `00:00`. Sub-second precision is truncated.
#[must_use]
pub fn format_countdown(ms: i64) -> String {
    let (minutes, seconds) = ms_to_minutes_seconds(ms.max(0));
    format_mmss(minutes, seconds)
}

/// Format a minutes/seconds pair as zero-padded `MM:SS`.
#[must_use]
pub fn format_mmss(minutes: i64, seconds: i64) -> String {
    format!("{minutes:02}:{seconds:02}")
}

/// Format stopwatch time as `MM:SS:CC` with centiseconds.
#[must_use]
pub fn format_stopwatch(ms: i64) -> String {
    let ms = ms.max(0);
    let (minutes, seconds) = ms_to_minutes_seconds(ms);
    format!("{minutes:02}:{seconds:02}:{:02}", (ms % 1000) / 10)
}

/// Format elapsed run time as `m:ss` with unpadded minutes.
#[must_use]
pub fn format_total(ms: i64) -> String {
    let (minutes, seconds) = ms_to_minutes_seconds(ms.max(0));
    format!("{minutes}:{seconds:02}")
}

/// Format a duration as a human-readable string.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let total_minutes = d.num_minutes();

    if total_minutes < 1 {
        let seconds = d.num_seconds();
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let seconds = d.num_seconds() % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, if hours == 1 { "" } else { "s" }));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" }));
    }
    if seconds > 0 {
        parts.push(format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" }));
    }
    parts.join(", ")
}

/// Parse a duration string like "25m", "1h30m", "90s" or "1500ms".
///
/// A bare number is taken as minutes. Zero is a valid duration.
#[must_use]
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();
    if s.is_empty() {
        return None;
    }

    if let Ok(minutes) = s.parse::<i64>() {
        if minutes < 0 {
            return None;
        }
        return minutes.checked_mul(60_000).map(Duration::milliseconds);
    }

    let mut total_ms: i64 = 0;
    let mut cursor = 0;

    for caps in DURATION_TOKEN.captures_iter(&s) {
        let whole = caps.get(0)?;
        // Anything between tokens other than whitespace is garbage.
        if !s[cursor..whole.start()].trim().is_empty() {
            return None;
        }
        cursor = whole.end();

        let num: i64 = caps.get(1)?.as_str().parse().ok()?;
        let unit_ms = match caps.get(2)?.as_str() {
            "h" => 3_600_000,
            "m" => 60_000,
            "s" => 1_000,
            "ms" => 1,
            _ => return None,
        };
        total_ms = total_ms.checked_add(num.checked_mul(unit_ms)?)?;
    }

    if cursor == 0 || !s[cursor..].trim().is_empty() {
        return None;
    }

    Some(Duration::milliseconds(total_ms))
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
