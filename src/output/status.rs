//! Format-neutral status text shared by the CLI and the TUI.

use crate::core::duration::ms_to_minutes_seconds;
use crate::core::{format_mmss, format_total};
use crate::features::countdown::{Phase, TimerMode};
use crate::features::engine::{TimerKind, TimerSnapshot};

/// Cycle counts above this are shown as a single bar instead of segments.
pub const MAX_SEGMENTS: u32 = 10;

/// State of one cycle in the segment display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// Cycle already finished.
    Done,
    /// Cycle in progress, in the given phase.
    Current(Phase),
    /// Cycle not reached yet.
    Pending,
}

/// One-line summary, e.g. `Cycle 2/20 • Work Time`.
#[must_use]
pub fn status_line(snapshot: &TimerSnapshot) -> String {
    let progress = match snapshot.kind {
        TimerKind::Interval => match snapshot.mode.unwrap_or_default() {
            TimerMode::Cycles => {
                format!("Cycle {}/{}", snapshot.current_cycle, snapshot.cycle_count)
            }
            TimerMode::TotalTime => format!(
                "Total: {}/{}",
                format_total(snapshot.total_elapsed_ms),
                mmss(snapshot.total_duration_ms)
            ),
        },
        TimerKind::Pomodoro => format!("Session {}", snapshot.current_cycle),
        TimerKind::Countdown => format!("Countdown • {}", mmss(snapshot.total_duration_ms)),
        TimerKind::Stopwatch => "Stopwatch".to_string(),
    };

    match snapshot.phase {
        Some(phase) => format!("{progress} • {}", phase.display_name()),
        None => progress,
    }
}

fn mmss(ms: i64) -> String {
    let (minutes, seconds) = ms_to_minutes_seconds(ms);
    format_mmss(minutes, seconds)
}

/// Per-cycle segments, or `None` when there are too many cycles to draw or
/// the timer has no cycles to show.
///
/// Pomodoro segments cover the sessions of the current set.
#[must_use]
pub fn cycle_segments(snapshot: &TimerSnapshot) -> Option<Vec<Segment>> {
    let phase = snapshot.phase?;
    let current = match snapshot.kind {
        TimerKind::Interval if snapshot.mode == Some(TimerMode::Cycles) => {
            snapshot.current_cycle
        }
        TimerKind::Pomodoro => (snapshot.current_cycle - 1) % snapshot.cycle_count.max(1) + 1,
        _ => return None,
    };
    if snapshot.cycle_count > MAX_SEGMENTS {
        return None;
    }

    let finished = snapshot.complete;
    Some(
        (1..=snapshot.cycle_count)
            .map(|cycle| {
                if cycle < current || (finished && cycle == current) {
                    Segment::Done
                } else if cycle == current {
                    Segment::Current(phase)
                } else {
                    Segment::Pending
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ManualClock;
    use crate::features::countdown::{CountdownTimer, TimerSettings};
    use crate::features::engine::{AnyTimer, TimerEngine, TimerProfile};

    #[test]
    fn test_status_line_cycles() {
        let clock = ManualClock::new(0);
        let timer = CountdownTimer::with_clock(TimerSettings::default(), &clock);
        assert_eq!(status_line(&timer.snapshot()), "Cycle 1/20 • Work Time");
    }

    #[test]
    fn test_status_line_total_time() {
        let clock = ManualClock::new(0);
        let settings = TimerSettings::total_time(60_000, 15_000, 1_200_000);
        let mut timer = CountdownTimer::with_clock(settings, &clock);
        timer.toggle();
        clock.advance(187_000);
        timer.tick();
        assert_eq!(status_line(&timer.snapshot()), "Total: 3:07/20:00 • Work Time");
    }

    #[test]
    fn test_segments() {
        let clock = ManualClock::new(0);
        let mut timer = CountdownTimer::with_clock(TimerSettings::cycles(1_000, 1_000, 3), &clock);
        timer.toggle();
        clock.advance(2_500);
        timer.tick();

        assert_eq!(
            cycle_segments(&timer.snapshot()),
            Some(vec![Segment::Done, Segment::Current(Phase::Work), Segment::Pending])
        );
    }

    #[test]
    fn test_segments_complete() {
        let clock = ManualClock::new(0);
        let mut timer = CountdownTimer::with_clock(TimerSettings::cycles(0, 0, 2), &clock);
        timer.toggle();
        timer.tick();
        assert_eq!(
            cycle_segments(&timer.snapshot()),
            Some(vec![Segment::Done, Segment::Done])
        );
    }

    #[test]
    fn test_no_segments_for_many_cycles() {
        let clock = ManualClock::new(0);
        let timer = CountdownTimer::with_clock(TimerSettings::cycles(1, 1, 11), &clock);
        assert!(cycle_segments(&timer.snapshot()).is_none());
    }

    #[test]
    fn test_status_line_other_kinds() {
        let clock = ManualClock::new(0);
        let profile = TimerProfile::default();
        let line = |kind| status_line(&AnyTimer::build(kind, &profile, &clock).snapshot());
        assert_eq!(line(TimerKind::Pomodoro), "Session 1 • Work Time");
        assert_eq!(line(TimerKind::Countdown), "Countdown • 5:00");
        assert_eq!(line(TimerKind::Stopwatch), "Stopwatch");
    }

    #[test]
    fn test_pomodoro_segments_follow_the_set() {
        let clock = ManualClock::new(0);
        let profile = TimerProfile::default();
        let mut timer = AnyTimer::build(TimerKind::Pomodoro, &profile, &clock);
        for _ in 0..5 {
            timer.skip_phase();
        }
        // Session 3, short break.
        assert_eq!(
            cycle_segments(&timer.snapshot()),
            Some(vec![
                Segment::Done,
                Segment::Done,
                Segment::Current(Phase::ShortBreak),
                Segment::Pending,
            ])
        );

        let countdown = AnyTimer::build(TimerKind::Countdown, &profile, &clock);
        assert!(cycle_segments(&countdown.snapshot()).is_none());
    }
}
