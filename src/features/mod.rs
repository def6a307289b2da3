//! Feature implementations for ttimer.
//!
//! This module contains:
//! - The interval countdown and the driver shared by every timer
//! - Pomodoro, plain countdown and stopwatch timers
//! - Phase-change alerts
//! - Schedule preview
//! - Shell completions

pub mod alert;
pub mod countdown;
pub mod engine;
pub mod pomodoro;
pub mod preview;
pub mod shell;
pub mod simple;
pub mod stopwatch;
