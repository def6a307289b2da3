use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::core::{parse_duration, MAX_DURATION_MS};
use crate::error::TimerError;
use crate::features::countdown::TimerMode;
use crate::features::engine::{TimerKind, TimerProfile};

#[derive(Parser)]
#[command(name = "ttimer")]
#[command(about = "A drift-corrected work/rest interval timer for the terminal")]
#[command(long_about = "ttimer - work/rest interval timer

Alternates work and rest phases and stops after a number of cycles
or after a total amount of time. The countdown is derived from the
wall clock, so it never drifts. Pomodoro, plain countdown and
stopwatch timers are available with --kind.

QUICK START:
  ttimer                              Interactive timer with default settings
  ttimer run --work 40s --rest 20s --cycles 8
  ttimer run --total 20m              Stop after 20 minutes
  ttimer preview --work 1m --rest 15s --cycles 4
  ttimer tui -k pomodoro --work 50m   Pomodoro with long sessions
  ttimer run -k countdown -d 3m       Ring once after three minutes
  ttimer tui -k stopwatch

DURATIONS:
  90        Bare numbers are minutes
  1m30s     Combined units (h, m, s, ms)

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to the configured format.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Log debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive timer
    ///
    /// Full-screen countdown with live settings.
    ///
    /// Keys:
    ///   space   start / pause
    ///   r       reset
    ///   s       skip the current phase
    ///   m       switch between cycles and total-time mode
    ///   t       switch timer kind
    ///   x       silence the alarm
    ///   e       show / hide settings
    ///   q       quit
    Tui(TimerArgs),

    /// Run the timer without a UI
    ///
    /// Prints each phase change and exits when the run completes.
    /// Pomodoro runs start each phase on their own and stop after
    /// --rounds sessions (one set by default).
    ///
    /// Examples:
    ///   ttimer run --work 40s --rest 20s --cycles 8
    ///   ttimer run --total 20m --work 1m --rest 15s
    ///   ttimer run -k pomodoro --rounds 2
    ///   ttimer run -o json
    Run(RunArgs),

    /// Show the phase timeline without waiting
    ///
    /// Simulates the run and lists every phase with its start time.
    Preview(PreviewArgs),

    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Examples:
    ///   ttimer completions bash
    ///   ttimer completions zsh > ~/.zsh/completions/_ttimer
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Timer mode as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    /// Stop after a number of cycles.
    Cycles,
    /// Stop after a total amount of time.
    TotalTime,
}

impl From<ModeArg> for TimerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Cycles => Self::Cycles,
            ModeArg::TotalTime => Self::TotalTime,
        }
    }
}

/// Timer kind as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KindArg {
    /// Work/rest intervals.
    Interval,
    /// Work sessions with short and long breaks.
    Pomodoro,
    /// A single countdown.
    Countdown,
    /// Count up from zero.
    Stopwatch,
}

impl From<KindArg> for TimerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Interval => Self::Interval,
            KindArg::Pomodoro => Self::Pomodoro,
            KindArg::Countdown => Self::Countdown,
            KindArg::Stopwatch => Self::Stopwatch,
        }
    }
}

/// Overrides for the configured timer settings.
#[derive(Args, Debug, Clone, Default)]
pub struct TimerArgs {
    /// Timer to use
    #[arg(long, short = 'k', value_enum)]
    pub kind: Option<KindArg>,

    /// Work phase length (e.g., 25m, 1m30s, 45s); the session length for Pomodoro
    #[arg(long, short = 'w')]
    pub work: Option<String>,

    /// Rest phase length (e.g., 5m, 15s)
    #[arg(long, short = 'r')]
    pub rest: Option<String>,

    /// Number of work/rest cycles
    #[arg(long, short = 'c')]
    pub cycles: Option<u32>,

    /// Total run length (selects total-time mode unless --mode is given)
    #[arg(long, short = 't')]
    pub total: Option<String>,

    /// Stop condition
    #[arg(long, short = 'm', value_enum)]
    pub mode: Option<ModeArg>,

    /// Pomodoro short break length
    #[arg(long)]
    pub short_break: Option<String>,

    /// Pomodoro long break length
    #[arg(long)]
    pub long_break: Option<String>,

    /// Pomodoro sessions before a long break
    #[arg(long)]
    pub sessions: Option<u32>,

    /// Pomodoro sessions to run before stopping
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Countdown length
    #[arg(long, short = 'd')]
    pub duration: Option<String>,
}

impl TimerArgs {
    /// Apply the overrides on top of `base`.
    ///
    /// `--work` sets the Pomodoro session length when the selected kind is
    /// Pomodoro, and the interval work phase otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a duration cannot be parsed or is too long.
    pub fn apply(&self, base: TimerProfile) -> Result<TimerProfile, TimerError> {
        let mut profile = base;
        if let Some(kind) = self.kind {
            profile.kind = kind.into();
        }

        let interval = &mut profile.interval;
        if let Some(ref rest) = self.rest {
            interval.rest_duration_ms = parse_ms("rest", rest)?;
        }
        if let Some(cycles) = self.cycles {
            interval.cycle_count = cycles;
        }
        if let Some(ref total) = self.total {
            interval.total_duration_ms = parse_ms("total", total)?;
        }
        interval.mode = match (self.mode, &self.total) {
            (Some(mode), _) => mode.into(),
            (None, Some(_)) => TimerMode::TotalTime,
            (None, None) => base.interval.mode,
        };

        let pomodoro = &mut profile.pomodoro;
        if let Some(ref short_break) = self.short_break {
            pomodoro.short_break_ms = parse_ms("short break", short_break)?;
        }
        if let Some(ref long_break) = self.long_break {
            pomodoro.long_break_ms = parse_ms("long break", long_break)?;
        }
        if let Some(sessions) = self.sessions {
            pomodoro.sessions_until_long_break = sessions;
        }
        if let Some(rounds) = self.rounds {
            pomodoro.session_limit = Some(rounds);
        }

        if let Some(ref duration) = self.duration {
            profile.countdown.duration_ms = parse_ms("countdown", duration)?;
        }

        if let Some(ref work) = self.work {
            let work = parse_ms("work", work)?;
            match profile.kind {
                TimerKind::Pomodoro => profile.pomodoro.work_duration_ms = work,
                _ => profile.interval.work_duration_ms = work,
            }
        }

        profile.interval = profile.interval.sanitized();
        profile.pomodoro = profile.pomodoro.sanitized();
        profile.countdown = profile.countdown.sanitized();
        Ok(profile)
    }
}

fn parse_ms(name: &str, value: &str) -> Result<i64, TimerError> {
    let ms = parse_duration(value)
        .map(|d| d.num_milliseconds())
        .ok_or_else(|| {
            TimerError::InvalidArgument(format!(
                "Invalid {name} duration '{value}'. Use e.g. 25m, 1m30s, 45s"
            ))
        })?;

    if ms > MAX_DURATION_MS {
        return Err(TimerError::InvalidArgument(format!(
            "The {name} duration '{value}' is too long. The limit is 1000h"
        )));
    }
    Ok(ms)
}

/// Arguments for the headless runner.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Do not ring the terminal bell
    #[arg(long)]
    pub no_bell: bool,
}

/// Arguments for the schedule preview.
#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub timer: TimerArgs,

    /// Maximum number of phases to list
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,
}

/// Arguments for config management.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the config file location
    Path,
}
