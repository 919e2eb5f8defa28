//! Package table with sort indicator and column selection.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Cell, Paragraph, Row as TableRow, Table},
};

use crate::state::{AppState, Column, ColumnKind, ViewMode};
use crate::theme::Theme;

/// What: Header label for a column.
///
/// Output:
/// - Title with `▲`/`▼` appended when the column is the active sort key
#[must_use]
pub fn header_label(column: &Column, sort: ColumnKind, reverse: bool) -> String {
    if column.kind != sort {
        return column.title.to_string();
    }
    let arrow = if reverse { '▼' } else { '▲' };
    format!("{} {arrow}", column.title)
}

/// Foreground that stays readable on the selection background.
fn selected_fg(th: &Theme) -> Color {
    if th.selected == th.foreground {
        th.background
    } else {
        th.foreground
    }
}

/// What: First window row to draw so the selection fits in `capacity` lines.
///
/// Details:
/// - The viewport window may be taller than the area when the detail panel or
///   a palette takes space; the window then slides down past the selection.
#[must_use]
pub const fn window_skip(relative_selected: usize, capacity: usize) -> usize {
    if capacity == 0 || relative_selected < capacity {
        0
    } else {
        relative_selected + 1 - capacity
    }
}

/// What: Render the table into `area`.
///
/// Inputs:
/// - `f`: Frame to draw into
/// - `app`: Application state (viewport and theme)
/// - `area`: Target rectangle including the header line
///
/// Details:
/// - Only the viewport's render window is turned into widgets.
/// - The `#` column shows the 1-based visible line number that `:g` takes.
/// - An empty remote result shows its message in place of rows.
pub fn render_table(f: &mut Frame, app: &AppState, area: Rect) {
    let th = &app.theme;
    let vp = &app.viewport;
    let selected_kind = vp.selected_column_kind();
    let columns: Vec<&Column> = vp.columns.iter().filter(|c| c.visible).collect();

    let header_cells = columns.iter().map(|c| {
        let mut style = Style::new().fg(th.accent1).add_modifier(Modifier::BOLD);
        if Some(c.kind) == selected_kind {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        Cell::from(header_label(c, vp.sort_column, vp.sort_reverse)).style(style)
    });
    let header = TableRow::new(header_cells).style(Style::new().bg(th.background_alt));

    let capacity = usize::from(area.height.saturating_sub(1));
    let window = vp.get_visible_rows();
    let relative = vp.selected_row.saturating_sub(vp.offset);
    let skip = window_skip(relative, capacity);

    let remote = app.view_mode == ViewMode::Remote;
    let rows = window
        .iter()
        .enumerate()
        .skip(skip)
        .take(capacity)
        .map(|(i, row)| {
            let style = if i == relative {
                Style::new()
                    .fg(selected_fg(th))
                    .bg(th.selected)
                    .add_modifier(Modifier::BOLD)
            } else if (vp.offset + i) % 2 == 1 {
                Style::new().fg(th.foreground).bg(th.background_alt)
            } else {
                Style::new().fg(th.foreground).bg(th.background)
            };
            let cells = columns.iter().map(|c| {
                let text = if c.kind == ColumnKind::Index {
                    (vp.offset + i + 1).to_string()
                } else {
                    row.cell(c.kind).to_string()
                };
                match c.kind {
                    ColumnKind::Installed if remote && text == "Yes" => {
                        Cell::from(text).style(Style::new().fg(th.accent3))
                    }
                    ColumnKind::Repository if text == "aur" => {
                        Cell::from(text).style(Style::new().fg(th.accent4))
                    }
                    ColumnKind::Index | ColumnKind::Description if i != relative => {
                        Cell::from(text).style(Style::new().fg(th.dimmed))
                    }
                    _ => Cell::from(text),
                }
            });
            TableRow::new(cells).style(style)
        });

    let widths = columns.iter().map(|c| {
        if c.fill {
            Constraint::Min(c.width)
        } else {
            Constraint::Length(c.width)
        }
    });
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .style(Style::new().fg(th.foreground).bg(th.background));
    f.render_widget(table, area);

    if window.is_empty() && area.height > 2 {
        let text = if app.is_searching() {
            format!("{} Searching...", app.spinner())
        } else if let Some(e) = &app.remote_error {
            e.clone()
        } else {
            "No packages".to_string()
        };
        let message = Paragraph::new(Span::styled(text, Style::new().fg(th.dimmed)))
            .alignment(Alignment::Center);
        let line = Rect {
            y: area.y + area.height / 2,
            height: 1,
            ..area
        };
        f.render_widget(message, line);
    }
}
