//! ttimer - a work/rest interval timer for the terminal
//!
//! This crate provides a drift-corrected countdown that alternates work and
//! rest phases, plus Pomodoro, plain countdown and stopwatch timers, with an
//! interactive TUI and a headless runner on top.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::TimerError;
pub use features::countdown::CountdownTimer;
pub use features::engine::{AnyTimer, TimerEngine, TimerKind};
