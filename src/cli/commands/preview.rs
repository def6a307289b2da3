//! Schedule preview command.

use crate::cli::args::{OutputFormat, PreviewArgs};
use crate::config::Config;
use crate::error::TimerError;
use crate::features::preview::preview as plan_schedule;
use crate::output::format_preview;

/// Execute the preview command.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or serialization fails.
pub fn preview(
    config: &Config,
    args: &PreviewArgs,
    format: OutputFormat,
) -> Result<String, TimerError> {
    let profile = args.timer.apply(config.to_profile())?;
    let plan = plan_schedule(&profile, args.limit)?;
    format_preview(&plan, format)
}
