//! Bottom status line.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::state::{AppState, InputMode, NoticeKind, OpKind, OpState, ViewMode};
use crate::theme::Theme;

/// Emphasis applied to the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    /// Plain local view or typed input.
    Normal,
    /// Remote search view.
    Remote,
    /// Confirmation, password, or running operation.
    Warning,
    /// Successful completion or informational notice.
    Success,
    /// Failed operation or error notice.
    Error,
}

/// What: Compose the status line for the current state.
///
/// Inputs:
/// - `app`: Application state
///
/// Output:
/// - Text and the emphasis it is rendered with
///
/// Details:
/// - Typed input wins, then the operation state, then a pending notice, then
///   the view summary.
#[must_use]
pub fn status_text(app: &AppState) -> (String, StatusKind) {
    match app.mode {
        InputMode::Command | InputMode::Filter => return (app.buffer.clone(), StatusKind::Normal),
        InputMode::Password => {
            let mask = "*".repeat(app.password.chars().count());
            return (format!("[sudo] password: {mask}"), StatusKind::Warning);
        }
        InputMode::Normal => {}
    }
    if let Some(status) = operation_status(app) {
        return status;
    }
    if let Some(notice) = &app.notice {
        let kind = match notice.kind {
            NoticeKind::Info => StatusKind::Success,
            NoticeKind::Error => StatusKind::Error,
        };
        return (notice.text.clone(), kind);
    }
    match app.view_mode {
        ViewMode::Local => (local_summary(app), StatusKind::Normal),
        ViewMode::Remote => (remote_summary(app), StatusKind::Remote),
    }
}

/// Status while an install or remove is pending, running, or finished.
fn operation_status(app: &AppState) -> Option<(String, StatusKind)> {
    let spinner = app.spinner();
    let status = match &app.op {
        OpState::Idle | OpState::PasswordPrompt(_) => return None,
        OpState::PendingConfirm(op) => {
            let text = match (op.kind, op.is_aur, app.helper.as_deref()) {
                (OpKind::Install, true, Some(helper)) => format!(
                    "⚠ Press Enter to install {} via {helper} or Esc to cancel",
                    op.package
                ),
                (OpKind::Install, _, _) => {
                    format!("⚠ Press Enter to install {} or Esc to cancel", op.package)
                }
                (OpKind::Remove, _, _) => {
                    format!("⚠ Press Enter to remove {} or Esc to cancel", op.package)
                }
            };
            (text, StatusKind::Warning)
        }
        OpState::Running(op) => {
            let verb = match op.kind {
                OpKind::Install => "Installing",
                OpKind::Remove => "Removing",
            };
            (format!("{spinner} {verb} {}...", op.package), StatusKind::Warning)
        }
        OpState::Completed { op, error, .. } => match (op.kind, error) {
            (OpKind::Install, None) => (
                "✓ Package installed successfully. Press Enter to dismiss.".to_string(),
                StatusKind::Success,
            ),
            (OpKind::Remove, None) => (
                "✓ Package removed successfully. Press Enter to dismiss.".to_string(),
                StatusKind::Success,
            ),
            (OpKind::Install, Some(e)) => {
                (format!("Error installing package: {e}"), StatusKind::Error)
            }
            (OpKind::Remove, Some(e)) => {
                (format!("Error removing package: {e}"), StatusKind::Error)
            }
        },
    };
    Some(status)
}

/// `Showing a-b of n`, one-based and clamped to the visible rows.
fn showing_range(app: &AppState) -> String {
    let vp = &app.viewport;
    let total = vp.visible_len();
    if total == 0 {
        return "Showing 0-0 of 0".to_string();
    }
    let start = vp.offset.min(total - 1) + 1;
    let end = if vp.height == 0 {
        total
    } else {
        (vp.offset + vp.height).min(total)
    };
    format!("Showing {start}-{end} of {total}")
}

/// ` | Filter: "term"` when a text filter is active.
fn filter_suffix(app: &AppState) -> String {
    app.viewport
        .filter
        .terms
        .as_ref()
        .filter(|_| app.viewport.filter.active)
        .and_then(|t| t.first())
        .map(|term| format!(" | Filter: \"{term}\""))
        .unwrap_or_default()
}

fn local_summary(app: &AppState) -> String {
    let preset = app.preset().map_or("All", |p| p.name);
    format!(
        "Preset: {preset} | {}{}",
        showing_range(app),
        filter_suffix(app)
    )
}

fn remote_summary(app: &AppState) -> String {
    let query = app.remote_query.as_deref().unwrap_or("");
    if app.is_searching() {
        return format!("{} Searching: {query}", app.spinner());
    }
    let mut text = format!(
        "SEARCH: {query} | {}{}",
        showing_range(app),
        filter_suffix(app)
    );
    if let Some(e) = &app.remote_error {
        text.push_str(" | ");
        text.push_str(e);
    }
    text
}

/// Style for a status emphasis.
fn status_style(th: &Theme, kind: StatusKind) -> Style {
    let base = Style::new().bg(th.background_alt);
    match kind {
        StatusKind::Normal => base.fg(th.accent2),
        StatusKind::Remote => base.fg(th.remote_accent).add_modifier(Modifier::BOLD),
        StatusKind::Warning => base.fg(th.warning_accent).add_modifier(Modifier::BOLD),
        StatusKind::Success => base.fg(th.accent3),
        StatusKind::Error => base.fg(th.accent5).add_modifier(Modifier::BOLD),
    }
}

/// What: Cut `text` to at most `max` terminal cells.
///
/// Output:
/// - `text` unchanged when it fits, otherwise a prefix ending in `…`
#[must_use]
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// What: Render the status line into `area`.
///
/// Details:
/// - A `[dry run]` tag is appended on the right while commands are only described.
pub fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let th = &app.theme;
    let (text, kind) = status_text(app);
    let style = status_style(th, kind);
    let tag_width = if app.dry_run { 11 } else { 0 };
    let room = usize::from(area.width).saturating_sub(1 + tag_width);
    let mut spans = vec![Span::styled(
        format!(" {}", truncate_to_width(&text, room)),
        style,
    )];
    if app.dry_run {
        spans.push(Span::styled(
            "  [dry run]",
            Style::new().fg(th.dimmed).bg(th.background_alt),
        ));
    }
    let paragraph = Paragraph::new(Line::from(spans)).style(Style::new().bg(th.background_alt));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Operation;
    use crate::test_utils::named_packages;

    fn loaded(names: &[&str]) -> AppState {
        let mut app = AppState {
            loading: false,
            ..AppState::default()
        };
        app.viewport.height = 10;
        app.viewport.set_rows(named_packages(names));
        app
    }

    #[test]
    /// What: Local summary names the preset, range, and filter.
    fn local_summary_with_filter() {
        let mut app = loaded(&["alpha", "beta", "gamma"]);
        assert_eq!(
            status_text(&app),
            ("Preset: Explicit | Showing 1-3 of 3".to_string(), StatusKind::Normal)
        );
        app.viewport.apply_filter("Al");
        assert_eq!(
            status_text(&app).0,
            "Preset: Explicit | Showing 1-1 of 1 | Filter: \"al\""
        );
    }

    #[test]
    /// What: Empty tables report a zero range.
    fn empty_range() {
        let app = loaded(&[]);
        assert!(status_text(&app).0.ends_with("Showing 0-0 of 0"));
    }

    #[test]
    /// What: Remote view shows the spinner while searching and the error afterwards.
    fn remote_summary_states() {
        let mut app = loaded(&[]);
        app.view_mode = ViewMode::Remote;
        app.remote_query = Some("rg".into());
        app.search = Some(crate::logic::SearchJoin::new(1, "rg", true));
        let (text, kind) = status_text(&app);
        assert_eq!(text, "⠋ Searching: rg");
        assert_eq!(kind, StatusKind::Remote);

        app.search = None;
        app.remote_error = Some("No packages found".into());
        assert_eq!(
            status_text(&app).0,
            "SEARCH: rg | Showing 0-0 of 0 | No packages found"
        );
    }

    #[test]
    /// What: Password input is masked.
    fn password_is_masked() {
        let mut app = loaded(&["a"]);
        app.mode = InputMode::Password;
        app.password.push_str("hunter2");
        assert_eq!(
            status_text(&app),
            ("[sudo] password: *******".to_string(), StatusKind::Warning)
        );
    }

    #[test]
    /// What: Operation states produce their prompts and results.
    fn operation_texts() {
        let mut app = loaded(&["a"]);
        app.helper = Some("paru".into());
        let op = Operation {
            kind: OpKind::Install,
            package: "foo".into(),
            is_aur: true,
        };
        app.op = OpState::PendingConfirm(op.clone());
        assert_eq!(
            status_text(&app).0,
            "⚠ Press Enter to install foo via paru or Esc to cancel"
        );
        app.op = OpState::Running(op.clone());
        assert_eq!(status_text(&app).0, "⠋ Installing foo...");
        app.op = OpState::Completed {
            op: op.clone(),
            output: String::new(),
            error: Some("boom".into()),
        };
        assert_eq!(
            status_text(&app),
            ("Error installing package: boom".to_string(), StatusKind::Error)
        );
        app.op = OpState::Completed {
            op: Operation {
                kind: OpKind::Remove,
                ..op
            },
            output: String::new(),
            error: None,
        };
        assert_eq!(
            status_text(&app).0,
            "✓ Package removed successfully. Press Enter to dismiss."
        );
    }

    #[test]
    /// What: Long text is cut on cell boundaries with an ellipsis.
    fn truncates_by_cell_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    /// What: Notices replace the summary and typed input replaces both.
    fn notice_and_input_precedence() {
        let mut app = loaded(&["a"]);
        app.error("Invalid line number: x");
        assert_eq!(
            status_text(&app),
            ("Invalid line number: x".to_string(), StatusKind::Error)
        );
        app.mode = InputMode::Command;
        app.buffer = ":g 1".into();
        assert_eq!(status_text(&app).0, ":g 1");
    }
}
