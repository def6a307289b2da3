//! Pomodoro timer.
//!
//! Work sessions separated by breaks. Every `sessions_until_long_break`-th
//! session is followed by a long break, all others by a short one. Each phase
//! ends in an alarm and, unless auto-start is on, waits for the user to start
//! the next one.

pub mod settings;
pub mod timer;

pub use settings::PomodoroSettings;
pub use timer::PomodoroTimer;
