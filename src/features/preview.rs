//! Schedule preview.
//!
//! Runs a timer against a [`ManualClock`], jumping straight from one phase
//! boundary to the next, and records the resulting timeline. Only timers with
//! phases have a schedule.

use serde::Serialize;

use crate::core::{Clock, ManualClock};
use crate::error::TimerError;
use crate::features::countdown::{Phase, TimerEvent, TimerMode};
use crate::features::engine::{AnyTimer, TimerEngine, TimerKind, TimerProfile};

/// One phase of a planned run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedPhase {
    /// Phase kind.
    pub phase: Phase,
    /// Cycle or session the phase belongs to.
    pub cycle: u32,
    /// Offset from the start of the run.
    pub starts_at_ms: i64,
    /// How long the phase actually lasts, shortened if the run ends early.
    pub duration_ms: i64,
}

/// The full timeline of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePreview {
    /// Timer the schedule belongs to.
    pub kind: TimerKind,
    /// Phases in order.
    pub phases: Vec<PlannedPhase>,
    /// Length of the whole run.
    pub total_ms: i64,
    /// Whether the listing stopped at the phase limit.
    pub truncated: bool,
    /// Stop condition of an interval run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<TimerMode>,
}

/// Simulate a run of `profile.kind` and list its phases, at most `limit` of
/// them.
///
/// Pomodoro runs use the unattended profile, so they end after the session
/// limit.
///
/// # Errors
///
/// Returns [`TimerError::InvalidArgument`] for timers without phases.
pub fn preview(profile: &TimerProfile, limit: usize) -> Result<SchedulePreview, TimerError> {
    if !profile.kind.has_phases() {
        return Err(TimerError::InvalidArgument(format!(
            "{} has no phases to preview",
            profile.kind
        )));
    }

    let clock = ManualClock::new(0);
    let mut timer = AnyTimer::build(profile.kind, &profile.unattended(), &clock);
    let first = timer.snapshot();
    let phase = first.phase.unwrap_or_default();

    let mut starts: Vec<(Phase, u32, i64)> = vec![(phase, first.current_cycle, 0)];
    let mut end_ms = None;
    let mut truncated = false;

    timer.toggle();
    while end_ms.is_none() {
        if starts.len() > limit {
            truncated = true;
            break;
        }

        let Some(next) = timer.next_deadline_ms() else {
            break;
        };
        clock.set(next.max(clock.now_ms()));
        timer.tick();

        for event in timer.take_events() {
            match event {
                TimerEvent::PhaseChanged {
                    phase, cycle, at_ms, ..
                } => starts.push((phase, cycle, at_ms)),
                TimerEvent::Completed { at_ms } => end_ms = Some(at_ms),
                TimerEvent::Alert { .. } => {}
            }
        }
    }

    let end = end_ms.unwrap_or_else(|| clock.now_ms());
    starts.truncate(limit);

    let phases = starts
        .iter()
        .enumerate()
        .map(|(i, &(phase, cycle, starts_at_ms))| {
            let until = starts.get(i + 1).map_or(end, |next| next.2);
            PlannedPhase {
                phase,
                cycle,
                starts_at_ms,
                duration_ms: until.saturating_sub(starts_at_ms).max(0),
            }
        })
        .collect();

    Ok(SchedulePreview {
        kind: profile.kind,
        phases,
        total_ms: end,
        truncated,
        mode: first.mode,
    })
}
