//! Command implementations for ttimer.
//!
//! This module contains the implementation of all CLI commands.

mod config;
mod preview;
mod run;

pub use config::config;
pub use preview::preview;
pub use run::{run, run_timer};

use std::io::{IsTerminal, Write};

use clap_complete::Shell;

use crate::config::AlertConfig;
use crate::error::TimerError;
use crate::features::alert::{BellNotifier, Notifier, SilentNotifier};
use crate::features::shell::{completion_install_instructions, generate_completions};

/// Execute completions command
///
/// When stdout is a terminal, install instructions are printed to stderr.
///
/// # Errors
///
/// Returns an error if the completion script cannot be generated.
pub fn completions(shell: Shell) -> Result<String, TimerError> {
    if std::io::stdout().is_terminal() {
        eprintln!("{}", completion_install_instructions(shell));
    }
    generate_completions(shell)
}

/// Pick the notifier described by the alert config.
pub fn notifier_for<W: Write + 'static>(
    alert: &AlertConfig,
    no_bell: bool,
    out: W,
) -> Box<dyn Notifier> {
    if alert.enabled && alert.bell && !no_bell {
        Box::new(BellNotifier::new(out))
    } else {
        Box::new(SilentNotifier)
    }
}
