//! Core abstractions for ttimer.
//!
//! This module provides the time source and duration helpers shared by the
//! countdown, the output formatters and the TUI.

pub mod clock;
pub mod duration;

pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::{
    format_countdown, format_duration, format_mmss, format_stopwatch, format_total,
    minutes_seconds_to_ms, parse_duration, render_progress_bar, MAX_DURATION_MS,
};
