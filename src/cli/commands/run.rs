//! Headless timer command.
//!
//! Runs a timer in the foreground and streams each event as a line. The
//! stopwatch never ends, so it is only offered by the interactive UI.

use std::io::Write;
use std::time::Duration;

use tracing::info;

use super::notifier_for;
use crate::cli::args::{OutputFormat, RunArgs};
use crate::config::Config;
use crate::core::SystemClock;
use crate::error::TimerError;
use crate::features::countdown::{TimerDriver, TimerEvent};
use crate::features::engine::{AnyTimer, TimerEngine, TimerKind};
use crate::output::{format_event, format_status};

/// Poll interval while the last alert pulses play out.
const ALERT_DRAIN_MS: u64 = 50;

/// Execute the run command.
///
/// Events are written to stdout as they happen; the returned string is the
/// final status.
///
/// # Errors
///
/// Returns an error if the arguments are invalid or output cannot be written.
pub fn run(config: &Config, args: &RunArgs, format: OutputFormat) -> Result<String, TimerError> {
    let profile = args.timer.apply(config.to_profile())?.unattended();
    if profile.kind == TimerKind::Stopwatch {
        return Err(TimerError::InvalidArgument(
            "The stopwatch never finishes. Use `ttimer tui --kind stopwatch`".to_string(),
        ));
    }

    let notifier = notifier_for(&config.alert, args.no_bell, std::io::stderr());
    let mut driver = TimerDriver::new(
        AnyTimer::build(profile.kind, &profile, SystemClock),
        notifier,
        i64::from(config.timer.tick_interval_ms),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_timer(&mut driver, &mut out, format, std::thread::sleep)?;
    driver.shutdown();

    let snapshot = driver.timer().snapshot();
    match format {
        OutputFormat::Pretty => format_status(&snapshot, format),
        OutputFormat::Json => Ok(serde_json::to_string(&snapshot)?),
    }
}

/// Drive a timer from start to completion.
///
/// `sleep` is called with the wait until the next tick.
///
/// # Errors
///
/// Returns an error if an event cannot be written.
pub fn run_timer<T, W, S>(
    driver: &mut TimerDriver<T>,
    out: &mut W,
    format: OutputFormat,
    mut sleep: S,
) -> Result<(), TimerError>
where
    T: TimerEngine,
    W: Write,
    S: FnMut(Duration),
{
    let snapshot = driver.timer().snapshot();
    if let Some(phase) = snapshot.phase {
        let start = TimerEvent::PhaseChanged {
            phase,
            cycle: snapshot.current_cycle,
            duration_ms: snapshot.remaining_ms,
            at_ms: driver.timer().now_ms(),
        };
        write_events(out, &[start], format)?;
    }

    let events = driver.toggle();
    write_events(out, &events, format)?;
    info!(kind = %snapshot.kind, "headless run started");

    while driver.timer().is_running() {
        sleep(driver.time_until_next_tick().unwrap_or_default());
        let events = driver.poll();
        write_events(out, &events, format)?;
        driver.pump_alerts()?;
    }

    while driver.alerts_pending() {
        sleep(Duration::from_millis(ALERT_DRAIN_MS));
        driver.pump_alerts()?;
    }

    Ok(())
}

fn write_events<W: Write>(
    out: &mut W,
    events: &[TimerEvent],
    format: OutputFormat,
) -> Result<(), TimerError> {
    for event in events {
        if let Some(line) = format_event(event, format)? {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Clock, ManualClock};
    use crate::features::alert::SilentNotifier;
    use crate::features::countdown::TimerSettings;
    use crate::features::engine::TimerProfile;

    fn interval(settings: TimerSettings) -> TimerProfile {
        TimerProfile {
            interval: settings,
            ..TimerProfile::default()
        }
    }

    fn run_to_end(profile: TimerProfile, format: OutputFormat) -> (String, ManualClock) {
        let clock = ManualClock::new(0);
        let mut out = Vec::new();
        {
            let profile = profile.unattended();
            let mut driver = TimerDriver::new(
                AnyTimer::build(profile.kind, &profile, &clock),
                Box::new(SilentNotifier),
                100,
            );
            run_timer(&mut driver, &mut out, format, |wait| {
                clock.advance(i64::try_from(wait.as_millis()).unwrap());
            })
            .unwrap();
            assert!(driver.timer().is_complete());
        }
        (String::from_utf8(out).unwrap(), clock)
    }

    #[test]
    fn test_run_cycles_json_lines() {
        let profile = interval(TimerSettings::cycles(1_000, 500, 2));
        let (output, clock) = run_to_end(profile, OutputFormat::Json);
        let events: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        let kinds: Vec<&str> = events.iter().map(|e| e["event"].as_str().unwrap()).collect();
        assert_eq!(kinds.first(), Some(&"phase_changed"));
        assert_eq!(kinds.last(), Some(&"completed"));
        assert_eq!(kinds.iter().filter(|k| **k == "phase_changed").count(), 4);
        assert!(kinds.contains(&"alert"));

        // 1000 + 500 + 1000 + 500 within one tick of the boundary
        assert!(clock.now_ms() >= 3_000);
        assert!(clock.now_ms() < 3_100);
    }

    #[test]
    fn test_run_total_time_pretty() {
        colored::control::set_override(false);
        let profile = interval(TimerSettings::total_time(300, 200, 1_000));
        let (output, clock) = run_to_end(profile, OutputFormat::Pretty);
        assert!(output.contains("Work Time"));
        assert!(output.contains("Rest Time"));
        assert!(output.contains("Timer complete"));
        assert!(!output.contains("alert"));
        assert!(clock.now_ms() >= 1_000);
    }

    #[test]
    fn test_run_zero_durations_finishes() {
        let profile = interval(TimerSettings::cycles(0, 0, 3));
        let (output, _) = run_to_end(profile, OutputFormat::Json);
        assert!(output.lines().last().unwrap().contains("completed"));
    }

    #[test]
    fn test_run_pomodoro_set() {
        let mut profile = TimerProfile {
            kind: TimerKind::Pomodoro,
            ..TimerProfile::default()
        };
        profile.pomodoro.work_duration_ms = 1_000;
        profile.pomodoro.short_break_ms = 200;
        profile.pomodoro.long_break_ms = 500;
        profile.pomodoro.sessions_until_long_break = 2;

        let (output, clock) = run_to_end(profile, OutputFormat::Json);
        let phases: Vec<String> = output
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .filter(|e| e["event"] == "phase_changed")
            .map(|e| e["phase"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(phases, ["work", "short-break", "work", "long-break"]);
        assert!(output.lines().last().unwrap().contains("completed"));
        // 1000 + 200 + 1000 + 500
        assert!(clock.now_ms() >= 2_700);
        assert!(clock.now_ms() < 2_800);
    }

    #[test]
    fn test_run_countdown_rings_once() {
        let mut profile = TimerProfile {
            kind: TimerKind::Countdown,
            ..TimerProfile::default()
        };
        profile.countdown.duration_ms = 1_500;

        let (output, clock) = run_to_end(profile, OutputFormat::Json);
        let kinds: Vec<String> = output
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap())
            .map(|e| e["event"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, ["alert", "completed"]);
        assert!(clock.now_ms() >= 1_500);
    }

    #[test]
    fn test_run_rejects_stopwatch() {
        let args = RunArgs {
            timer: crate::cli::args::TimerArgs {
                kind: Some(crate::cli::args::KindArg::Stopwatch),
                ..Default::default()
            },
            no_bell: true,
        };
        let err = run(&Config::default(), &args, OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("never finishes"));
    }
}
