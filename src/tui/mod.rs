//! Terminal User Interface (TUI) for ttimer.
//!
//! Full-screen countdown with a live settings panel.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;

use std::io;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;

use crate::cli::commands::notifier_for;
use crate::config::Config;
use crate::core::{Clock, SystemClock};
use crate::error::TimerError;
use crate::features::countdown::TimerDriver;
use crate::features::engine::{AnyTimer, TimerProfile};

/// Run the TUI application.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(config: &Config, profile: TimerProfile) -> Result<(), TimerError> {
    let driver = TimerDriver::new(
        AnyTimer::build(profile.kind, &profile, SystemClock),
        notifier_for(&config.alert, false, io::stdout()),
        i64::from(config.timer.tick_interval_ms),
    );
    let mut app = App::new(driver, &profile);

    // Setup terminal
    enable_raw_mode().map_err(|e| TimerError::terminal("Failed to enable raw mode", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| TimerError::terminal("Failed to setup terminal", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| TimerError::terminal("Failed to create terminal", e))?;

    info!(kind = %profile.kind, "tui started");
    let result = run_app(&mut terminal, &mut app);
    app.shutdown();

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock + Clone>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
) -> Result<(), TimerError> {
    loop {
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| TimerError::terminal("Failed to draw", e))?;

        if let Some(action) = event::handle_events(app.poll_timeout(), app.show_settings)? {
            match action {
                event::Action::Quit => break,
                event::Action::Toggle => app.toggle(),
                event::Action::Reset => app.reset(),
                event::Action::Skip => app.skip(),
                event::Action::SwitchMode => app.switch_mode(),
                event::Action::SwitchKind => app.switch_kind(),
                event::Action::Silence => app.silence(),
                event::Action::ToggleSettings => app.toggle_settings(),
                event::Action::NextField => app.select_next(),
                event::Action::PreviousField => app.select_previous(),
                event::Action::Input(c) => app.input_char(c),
                event::Action::Backspace => app.backspace(),
                event::Action::Commit => app.commit_field(),
                event::Action::CloseSettings => app.close_settings(),
                event::Action::Help => app.status = Some(app::HELP.to_string()),
            }
        }

        app.on_tick()?;
    }

    Ok(())
}
