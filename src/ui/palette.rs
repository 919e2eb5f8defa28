//! Command palette and operation output palette.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::logic::command::{CommandDef, available_commands, filter_commands};
use crate::state::{AppState, OpState, ViewMode};
use crate::theme::Theme;

/// Most lines of command output shown after an operation.
pub const OUTPUT_LINES: usize = 10;

/// What: Commands matching the typed command buffer.
#[must_use]
pub fn palette_commands(app: &AppState) -> Vec<CommandDef> {
    filter_commands(
        app.buffer_content(),
        available_commands(app.view_mode == ViewMode::Remote),
    )
}

/// What: Lines shown by the output palette.
///
/// Output:
/// - The last [`OUTPUT_LINES`] non-empty lines of the finished operation's
///   output, or of its error when there is no output; empty otherwise
#[must_use]
pub fn output_lines(app: &AppState) -> Vec<String> {
    let OpState::Completed { output, error, .. } = &app.op else {
        return Vec::new();
    };
    let source = if output.trim().is_empty() {
        error.as_deref().unwrap_or("")
    } else {
        output.as_str()
    };
    let lines: Vec<&str> = source.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(OUTPUT_LINES);
    lines[start..].iter().map(|l| (*l).to_string()).collect()
}

/// Bordered block used by both palettes.
fn palette_block<'a>(title: &'a str, th: &Theme) -> Block<'a> {
    Block::default()
        .title(Span::styled(
            title,
            Style::new().fg(th.accent2).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(th.dimmed))
        .style(Style::new().bg(th.background))
}

/// Rectangle of `lines` content rows plus borders anchored to the bottom of `area`.
fn bottom_rect(area: Rect, lines: usize) -> Rect {
    let wanted = u16::try_from(lines + 2).unwrap_or(u16::MAX);
    let height = wanted.min(area.height);
    Rect {
        y: area.y + area.height - height,
        height,
        ..area
    }
}

/// What: Render the command palette over the bottom of `area`.
///
/// Details:
/// - Nothing is drawn when no command matches the typed prefix.
pub fn render_command_palette(f: &mut Frame, app: &AppState, area: Rect) {
    let th = &app.theme;
    let commands = palette_commands(app);
    if commands.is_empty() {
        return;
    }
    let lines: Vec<Line> = commands
        .iter()
        .map(|c| {
            let mut spans = vec![Span::styled(
                format!("{:<6}", c.name),
                Style::new().fg(th.accent1).add_modifier(Modifier::BOLD),
            )];
            spans.push(Span::styled(
                format!("{:<10}", c.aliases.join(",")),
                Style::new().fg(th.dimmed),
            ));
            spans.push(Span::styled(
                format!("{:<9}", c.args),
                Style::new().fg(th.accent4),
            ));
            spans.push(Span::styled(c.description, Style::new().fg(th.foreground)));
            Line::from(spans)
        })
        .collect();
    let rect = bottom_rect(area, lines.len());
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(lines).block(palette_block(" Commands ", th)),
        rect,
    );
}

/// What: Render the output of a finished operation over the bottom of `area`.
pub fn render_output_palette(f: &mut Frame, app: &AppState, area: Rect) {
    let th = &app.theme;
    let lines = output_lines(app);
    if lines.is_empty() {
        return;
    }
    let failed = matches!(&app.op, OpState::Completed { error: Some(_), .. });
    let color = if failed { th.accent5 } else { th.foreground };
    let text: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(l, Style::new().fg(color))))
        .collect();
    let rect = bottom_rect(area, text.len());
    f.render_widget(Clear, rect);
    f.render_widget(
        Paragraph::new(text).block(palette_block(" Output ", th)),
        rect,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{InputMode, OpKind, Operation};

    fn completed(output: &str, error: Option<&str>) -> AppState {
        AppState {
            op: OpState::Completed {
                op: Operation {
                    kind: OpKind::Install,
                    package: "foo".into(),
                    is_aur: false,
                },
                output: output.into(),
                error: error.map(str::to_string),
            },
            ..AppState::default()
        }
    }

    #[test]
    /// What: The palette narrows by prefix and follows the view.
    fn palette_filters_by_prefix() {
        let mut app = AppState {
            mode: InputMode::Command,
            buffer: ":th".into(),
            ..AppState::default()
        };
        let names: Vec<&str> = palette_commands(&app).iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["theme"]);

        app.buffer = ":".into();
        assert!(palette_commands(&app).iter().any(|c| c.name == "r"));
        app.view_mode = ViewMode::Remote;
        assert!(palette_commands(&app).iter().any(|c| c.name == "i"));
        assert!(!palette_commands(&app).iter().any(|c| c.name == "r"));
    }

    #[test]
    /// What: Output is tailed and blank lines dropped; errors are used when output is empty.
    fn output_tail() {
        let long: String = (1..=15).map(|i| format!("line {i}\n\n")).collect();
        let lines = output_lines(&completed(&long, None));
        assert_eq!(lines.len(), OUTPUT_LINES);
        assert_eq!(lines[0], "line 6");
        assert_eq!(lines[9], "line 15");

        let lines = output_lines(&completed("", Some("pacman failed (exit 1): boom")));
        assert_eq!(lines, vec!["pacman failed (exit 1): boom".to_string()]);

        assert!(output_lines(&AppState::default()).is_empty());
    }
}
