//! Terminal rendering.
//!
//! Rendering reads the state and never mutates it. The screen is the package
//! table above a one-line status bar; the detail panel, command palette, and
//! output palette take space from the bottom of the table area.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
};

use crate::state::{AppState, InputMode, OpState};

pub mod detail;
pub mod palette;
pub mod status;
pub mod table;

/// What: Draw one frame.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Application state
///
/// Details:
/// - A fatal error or the initial load replaces the whole screen.
pub fn ui(f: &mut Frame, app: &AppState) {
    let th = &app.theme;
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::new().fg(th.foreground).bg(th.background)),
        area,
    );

    if let Some(e) = &app.fatal_error {
        render_fatal(f, app, e, area);
        return;
    }
    if app.loading {
        let text = Paragraph::new(Span::styled(
            "Loading packages...",
            Style::new().fg(th.accent2),
        ))
        .alignment(Alignment::Center);
        f.render_widget(text, centered_line(area));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    let (main, status_area) = (chunks[0], chunks[1]);

    let selected = app.viewport.selected_package().filter(|_| app.show_detail);
    let table_area = match selected {
        Some(pkg) => {
            let wanted = detail::panel_height(detail::detail_fields(pkg).len());
            let height = wanted.min(main.height / 2);
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(height)])
                .split(main);
            detail::render_detail(f, pkg, th, parts[1]);
            parts[0]
        }
        None => main,
    };
    table::render_table(f, app, table_area);

    if app.mode == InputMode::Command {
        palette::render_command_palette(f, app, half_height(table_area));
    } else if matches!(app.op, OpState::Completed { .. }) {
        palette::render_output_palette(f, app, half_height(table_area));
    }
    status::render_status(f, app, status_area);
}

/// Bottom half of `area`, where palettes may draw.
fn half_height(area: Rect) -> Rect {
    let height = area.height / 2;
    Rect {
        y: area.y + area.height - height,
        height,
        ..area
    }
}

/// Single row in the vertical middle of `area`.
fn centered_line(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

/// Centred error screen shown when the package source failed to start.
fn render_fatal(f: &mut Frame, app: &AppState, error: &str, area: Rect) {
    let th = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            format!("Error: {error}"),
            Style::new().fg(th.accent5).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press Ctrl+C to quit",
            Style::new().fg(th.dimmed),
        )),
    ];
    let rect = Rect {
        y: area.y + area.height / 2 - area.height.min(2) / 2,
        height: area.height.min(2),
        ..area
    };
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rect,
    );
}
