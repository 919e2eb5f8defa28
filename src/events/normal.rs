use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::actions::{
    cancel_operation, confirm_operation, enter_input_mode, exit_remote_mode, initiate_operation,
    next_preset,
};
use super::is_quit_key;
use crate::state::{AppState, Effect, InputMode, OpKind, OpState, ViewMode};

/// What: Handle a key in Normal mode.
///
/// Details:
/// - A pending confirmation swallows every key except Enter and Esc.
/// - A completed operation is acknowledged with Enter or Esc.
/// - Any key clears the current notice.
pub(super) fn handle_normal_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    app.notice = None;
    if matches!(app.op, OpState::PendingConfirm(_)) {
        return handle_confirm_key(ke, app);
    }
    if matches!(app.op, OpState::Completed { .. }) && matches!(ke.code, KeyCode::Enter) {
        app.op = OpState::Idle;
        return Vec::new();
    }
    if is_quit_key(ke) {
        return vec![Effect::Quit];
    }

    let ctrl = ke.modifiers.contains(KeyModifiers::CONTROL);
    match ke.code {
        KeyCode::Char('u') if ctrl => app.viewport.page_up(),
        KeyCode::Char('d') if ctrl => app.viewport.page_down(),
        KeyCode::PageUp => app.viewport.page_up(),
        KeyCode::PageDown => app.viewport.page_down(),
        KeyCode::Up | KeyCode::Char('k') => app.viewport.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.viewport.select_next(),
        KeyCode::Home | KeyCode::Char('g') => app.viewport.scroll_to_top(),
        KeyCode::End | KeyCode::Char('G') => app.viewport.scroll_to_bottom(),
        KeyCode::Left | KeyCode::Char('h') => app.viewport.prev_column(),
        KeyCode::Right | KeyCode::Char('l') => app.viewport.next_column(),
        KeyCode::Char(' ') => app.viewport.sort_selected_column(),
        KeyCode::Enter => app.show_detail = !app.show_detail,
        KeyCode::Esc => return handle_escape(app),
        KeyCode::Char(':') => enter_input_mode(app, InputMode::Command),
        KeyCode::Char('/') => enter_input_mode(app, InputMode::Filter),
        KeyCode::Tab => return next_preset(app),
        KeyCode::Char('i') if app.view_mode == ViewMode::Remote && app.show_detail => {
            return initiate_operation(app, OpKind::Install);
        }
        _ => {}
    }
    Vec::new()
}

/// Enter confirms, Esc or Ctrl+C cancels, anything else is ignored.
fn handle_confirm_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    match ke.code {
        KeyCode::Enter => confirm_operation(app),
        KeyCode::Esc => {
            cancel_operation(app);
            Vec::new()
        }
        KeyCode::Char('c') if ke.modifiers.contains(KeyModifiers::CONTROL) => {
            cancel_operation(app);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// Esc closes the innermost open thing: detail panel, output, remote view, filter.
fn handle_escape(app: &mut AppState) -> Vec<Effect> {
    if app.show_detail {
        app.show_detail = false;
    } else if matches!(app.op, OpState::Completed { .. }) {
        app.op = OpState::Idle;
    } else if app.view_mode == ViewMode::Remote {
        exit_remote_mode(app);
    } else if app.viewport.filter.active {
        app.viewport.clear_filter();
    }
    Vec::new()
}
