//! Config management command.

use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::TimerError;
use crate::output::{format_config, to_json};

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or serialized.
pub fn config(
    cmd: &ConfigCommands,
    config: &Config,
    paths: &Paths,
    format: OutputFormat,
) -> Result<String, TimerError> {
    match cmd {
        ConfigCommands::Show => format_config(config, format),
        ConfigCommands::Init { force } => init_config(paths, *force, format),
        ConfigCommands::Path => match format {
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
            OutputFormat::Json => to_json(&json!({
                "config_file": paths.config_file,
                "exists": paths.config_file.exists(),
            })),
        },
    }
}

fn init_config(paths: &Paths, force: bool, format: OutputFormat) -> Result<String, TimerError> {
    if paths.config_file.exists() && !force {
        return Err(TimerError::Config(format!(
            "{} already exists. Use --force to overwrite it.",
            paths.config_file.display()
        )));
    }

    paths.ensure_dirs()?;
    Config::default().save_to_path(&paths.config_file)?;
    info!(path = %paths.config_file.display(), "wrote default config");

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} {}",
            "Wrote".green(),
            paths.config_file.display()
        )),
        OutputFormat::Json => to_json(&json!({
            "written": paths.config_file,
        })),
    }
}
