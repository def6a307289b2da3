use colored::{ColoredString, Colorize};

use super::status::{cycle_segments, status_line, Segment};
use crate::config::Config;
use crate::core::{format_countdown, format_duration, format_total, render_progress_bar};
use crate::error::TimerError;
use crate::features::countdown::{Phase, TimerEvent};
use crate::features::engine::TimerSnapshot;
use crate::features::preview::SchedulePreview;

fn paint(text: &str, phase: Phase) -> ColoredString {
    match phase {
        Phase::Work => text.blue(),
        Phase::Rest => text.truecolor(249, 115, 22),
        Phase::ShortBreak | Phase::LongBreak => text.cyan(),
    }
}

fn phase_label(phase: Phase) -> ColoredString {
    paint(phase.display_name(), phase).bold()
}

/// Format a timer event as a single line. Alerts produce no line.
pub fn format_event_pretty(event: &TimerEvent) -> Option<String> {
    match event {
        TimerEvent::PhaseChanged {
            phase,
            cycle,
            duration_ms,
            ..
        } => {
            let duration = chrono::Duration::milliseconds(*duration_ms);
            Some(format!(
                "▶ {}  cycle {}  ({})",
                phase_label(*phase),
                cycle,
                format_duration(duration)
            ))
        }
        TimerEvent::Completed { .. } => Some(format!("{}", "✓ Timer complete".green().bold())),
        TimerEvent::Alert { .. } => None,
    }
}

/// Render the cycle segments as text blocks.
fn render_segments(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| match segment {
            Segment::Done => "▬".green().to_string(),
            Segment::Current(phase) => paint("▬", *phase).to_string(),
            Segment::Pending => "▬".dimmed().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a timer snapshot as a short status block.
pub fn format_status_pretty(snapshot: &TimerSnapshot) -> String {
    let mut output = Vec::new();

    let label = snapshot
        .phase
        .map_or_else(|| snapshot.kind.display_name().bold(), phase_label);
    output.push(format!("{}  {}", snapshot.display.bold(), label));
    output.push(status_line(snapshot));

    let progress = cycle_segments(snapshot).map_or_else(
        || render_progress_bar(snapshot.run_progress, 20),
        |segments| render_segments(&segments),
    );
    output.push(progress);

    let state = if snapshot.complete {
        "Complete".green()
    } else if snapshot.running {
        "Running".cyan()
    } else {
        "Stopped".dimmed()
    };
    output.push(format!(
        "{} after {}",
        state,
        format_total(snapshot.total_elapsed_ms)
    ));

    output.join("\n")
}

fn schedule_name(preview: &SchedulePreview) -> String {
    preview
        .mode
        .map_or_else(|| preview.kind.to_string(), |mode| mode.to_string())
}

/// Format a schedule preview as a table.
pub fn format_preview_pretty(preview: &SchedulePreview) -> String {
    let mut output = format!(
        "{} ({} phases, {} total)\n",
        format!("Schedule • {}", schedule_name(preview)).bold(),
        preview.phases.len(),
        format_total(preview.total_ms)
    );
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for (i, planned) in preview.phases.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}  {:>6}  {}  cycle {}  {}\n",
            i + 1,
            format_total(planned.starts_at_ms),
            phase_label(planned.phase),
            planned.cycle,
            format_countdown(planned.duration_ms).dimmed()
        ));
    }

    if preview.truncated {
        output.push_str(&format!("{}\n", "… more phases not shown".dimmed()));
    }

    output
}

/// Format the configuration as YAML.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn format_config_pretty(config: &Config) -> Result<String, TimerError> {
    config.to_yaml()
}
