//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::TimerError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the timer.
    Toggle,
    /// Reset the timer.
    Reset,
    /// Skip the current phase.
    Skip,
    /// Switch the stop condition.
    SwitchMode,
    /// Switch to the next timer kind.
    SwitchKind,
    /// Silence the alarm.
    Silence,
    /// Open or close the settings panel.
    ToggleSettings,
    /// Move to the next settings field.
    NextField,
    /// Move to the previous settings field.
    PreviousField,
    /// Type a character into the selected field.
    Input(char),
    /// Delete the last character of the selected field.
    Backspace,
    /// Commit the selected field.
    Commit,
    /// Close the settings panel.
    CloseSettings,
    /// Show key help.
    Help,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(
    timeout: Duration,
    editing: bool,
) -> Result<Option<Action>, TimerError> {
    if !event::poll(timeout).map_err(|e| TimerError::terminal("Event poll failed", e))? {
        return Ok(None);
    }

    match event::read().map_err(|e| TimerError::terminal("Event read failed", e))? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(action_for(key, editing)),
        _ => Ok(None),
    }
}

/// Map a key to an action. `editing` is true while the settings panel is open.
#[must_use]
pub fn action_for(key: KeyEvent, editing: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(' ') => Action::Toggle,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('s') => Action::Skip,
        KeyCode::Char('m') => Action::SwitchMode,
        KeyCode::Char('t') => Action::SwitchKind,
        KeyCode::Char('x') => Action::Silence,
        KeyCode::Char('e') => Action::ToggleSettings,
        KeyCode::Char('?') => Action::Help,

        // Settings panel only
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab if editing => Action::NextField,
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab if editing => Action::PreviousField,
        KeyCode::Char(c) if editing && (c.is_ascii_digit() || c == '-') => Action::Input(c),
        KeyCode::Backspace if editing => Action::Backspace,
        KeyCode::Enter if editing => Action::Commit,
        KeyCode::Esc if editing => Action::CloseSettings,

        KeyCode::Esc => Action::Quit,
        _ => return None,
    };
    Some(action)
}
