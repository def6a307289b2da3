//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Frame,
};

use crate::core::Clock;
use crate::features::countdown::{Phase, TimerMode};
use crate::features::engine::{TimerEngine, TimerKind};
use crate::output::{cycle_segments, status_line, Segment};
use crate::tui::app::{App, HELP};

/// Digits drawn five rows tall.
const GLYPH_ROWS: usize = 5;

fn glyph(c: char) -> [&'static str; GLYPH_ROWS] {
    match c {
        '0' => ["███", "█ █", "█ █", "█ █", "███"],
        '1' => ["  █", "  █", "  █", "  █", "  █"],
        '2' => ["███", "  █", "███", "█  ", "███"],
        '3' => ["███", "  █", "███", "  █", "███"],
        '4' => ["█ █", "█ █", "███", "  █", "  █"],
        '5' => ["███", "█  ", "███", "  █", "███"],
        '6' => ["███", "█  ", "███", "█ █", "███"],
        '7' => ["███", "  █", "  █", "  █", "  █"],
        '8' => ["███", "█ █", "███", "█ █", "███"],
        '9' => ["███", "█ █", "███", "  █", "███"],
        ':' => [" ", "█", " ", "█", " "],
        _ => [" "; GLYPH_ROWS],
    }
}

/// Render `text` in the large digit font.
fn big_text(text: &str) -> Vec<String> {
    (0..GLYPH_ROWS)
        .map(|row| {
            text.chars()
                .map(|c| glyph(c)[row])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

const fn phase_color(kind: TimerKind, phase: Option<Phase>) -> Color {
    match (kind, phase) {
        (TimerKind::Pomodoro, Some(Phase::Work)) => Color::Red,
        (_, Some(Phase::Work)) => Color::Blue,
        (_, Some(Phase::Rest)) => Color::Rgb(249, 115, 22),
        (_, Some(Phase::ShortBreak | Phase::LongBreak)) => Color::Cyan,
        (TimerKind::Stopwatch, None) => Color::Green,
        (_, None) => Color::Magenta,
    }
}

/// Rows above the fields: the kind, plus the mode for the interval timer.
const fn header_rows(kind: TimerKind) -> u16 {
    match kind {
        TimerKind::Interval => 2,
        _ => 1,
    }
}

/// Render the application UI.
pub fn render<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>) {
    let settings_height = if app.show_settings {
        let fields = u16::try_from(app.form.fields().len()).unwrap_or(u16::MAX);
        fields.saturating_add(header_rows(app.form.kind()) + 2)
    } else {
        0
    };

    // Create layout: header, countdown, progress, settings, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(7),
            Constraint::Length(3),
            Constraint::Length(settings_height),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_countdown(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    if app.show_settings {
        render_settings(frame, app, chunks[3]);
    }
    render_status_bar(frame, app, chunks[4]);
}

/// Render the header.
fn render_header<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let snapshot = app.driver.timer().snapshot();
    let color = phase_color(snapshot.kind, snapshot.phase);

    let header = Paragraph::new(format!(" {} ", status_line(&snapshot)))
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" ttimer • {} ", snapshot.kind))
                .border_style(Style::default().fg(color)),
        );

    frame.render_widget(header, area);
}

/// Render the big countdown.
fn render_countdown<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let snapshot = app.driver.timer().snapshot();
    let color = phase_color(snapshot.kind, snapshot.phase);

    let style = if app.is_flashing() {
        Style::default().fg(Color::Black).bg(color)
    } else {
        Style::default().fg(color)
    };

    let mut lines: Vec<Line<'_>> = vec![Line::from("")];
    lines.extend(big_text(&snapshot.display).into_iter().map(Line::from));

    let state = if snapshot.complete {
        "complete"
    } else if snapshot.running {
        "running"
    } else {
        "stopped"
    };
    lines.push(Line::from(Span::styled(
        state,
        Style::default().fg(Color::DarkGray),
    )));

    let title = match snapshot.phase {
        Some(phase) => phase.display_name(),
        None => snapshot.kind.display_name(),
    };
    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style.add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {title} ")),
        );

    frame.render_widget(countdown, area);
}

/// Render cycle segments, or a fraction bar when there are too many cycles.
fn render_progress<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let snapshot = app.driver.timer().snapshot();
    let block = Block::default().borders(Borders::ALL).title(" Progress ");

    if let Some(segments) = cycle_segments(&snapshot) {
        let spans: Vec<Span<'_>> = segments
            .iter()
            .flat_map(|segment| {
                let color = match segment {
                    Segment::Done => Color::Green,
                    Segment::Current(phase) => phase_color(snapshot.kind, Some(*phase)),
                    Segment::Pending => Color::DarkGray,
                };
                [
                    Span::styled("█████", Style::default().fg(color)),
                    Span::raw(" "),
                ]
            })
            .collect();
        let bar = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(bar, area);
    } else {
        let gauge = Gauge::default()
            .block(block)
            .gauge_style(Style::default().fg(phase_color(snapshot.kind, snapshot.phase)))
            .ratio(snapshot.run_progress.clamp(0.0, 1.0));
        frame.render_widget(gauge, area);
    }
}

/// Render the settings form.
fn choice_row(label: &'static str, value: &'static str, key: char) -> ListItem<'static> {
    ListItem::new(Line::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::DarkGray)),
        Span::styled(
            value,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  ({key} to switch)"), Style::default().fg(Color::DarkGray)),
    ]))
}

fn render_settings<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let mode = app.form.mode();
    let kind = app.form.kind();

    let mut items = vec![choice_row("Timer", kind.display_name(), 't')];
    if kind == TimerKind::Interval {
        items.push(choice_row("Mode", mode.display_name(), 'm'));
    }

    items.extend(app.form.fields().iter().map(|field| {
        let is_selected = *field == app.selected;
        let active = field.applies_to(mode);

        let mut style = if active {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if is_selected {
            style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
        }

        let cursor = if is_selected { "_" } else { "" };
        ListItem::new(Line::from(vec![
            Span::raw(format!("{:<12}", field.label())),
            Span::raw(format!("{}{cursor}", app.form.input(*field))),
        ]))
        .style(style)
    }));

    let title = match (kind, mode) {
        (TimerKind::Interval, TimerMode::Cycles) => " Settings • cycles ",
        (TimerKind::Interval, TimerMode::TotalTime) => " Settings • total time ",
        (TimerKind::Pomodoro, _) => " Settings • pomodoro ",
        (TimerKind::Countdown, _) => " Settings • countdown ",
        (TimerKind::Stopwatch, _) => " Settings • stopwatch ",
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(list, area);
}

/// Render the status bar.
fn render_status_bar<C: Clock + Clone>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}
