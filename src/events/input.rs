use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use zeroize::{Zeroize, Zeroizing};

use super::actions::{cancel_operation, execute_command, exit_input_mode, run_operation};
use super::is_ctrl_c;
use crate::logic::parse_command;
use crate::state::{AppState, Effect};

/// Printable character without Control or Alt.
fn typed_char(ke: KeyEvent) -> Option<char> {
    match ke.code {
        KeyCode::Char(c)
            if !c.is_control()
                && !ke.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}

/// Remove the last typed character, never the mode prefix.
fn pop_buffer(app: &mut AppState) {
    if app.buffer.chars().count() > 1 {
        app.buffer.pop();
    }
}

/// What: Handle a key while typing a `:` command.
///
/// Details:
/// - Enter leaves the mode first, then runs the parsed command.
pub(super) fn handle_command_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    if ke.code == KeyCode::Esc || is_ctrl_c(ke) {
        exit_input_mode(app);
        return Vec::new();
    }
    match ke.code {
        KeyCode::Enter => {
            let text = app.buffer_content().to_string();
            exit_input_mode(app);
            execute_command(app, parse_command(&text))
        }
        KeyCode::Backspace => {
            pop_buffer(app);
            Vec::new()
        }
        _ => {
            if let Some(c) = typed_char(ke) {
                app.buffer.push(c);
            }
            Vec::new()
        }
    }
}

/// What: Handle a key while typing a `/` filter.
///
/// Details:
/// - Every edit re-applies the filter; Enter keeps it, Esc clears it.
pub(super) fn handle_filter_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    if ke.code == KeyCode::Esc || is_ctrl_c(ke) {
        exit_input_mode(app);
        app.viewport.clear_filter();
        return Vec::new();
    }
    match ke.code {
        KeyCode::Enter => exit_input_mode(app),
        KeyCode::Backspace => {
            pop_buffer(app);
            let term = app.buffer_content().to_string();
            app.viewport.apply_filter(&term);
        }
        _ => {
            if let Some(c) = typed_char(ke) {
                app.buffer.push(c);
                let term = app.buffer_content().to_string();
                app.viewport.apply_filter(&term);
            }
        }
    }
    Vec::new()
}

/// What: Handle a key at the sudo password prompt.
///
/// Details:
/// - Enter hands the password to the operation and wipes the buffer.
/// - Esc cancels the pending operation.
pub(super) fn handle_password_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    if ke.code == KeyCode::Esc || is_ctrl_c(ke) {
        app.password.zeroize();
        exit_input_mode(app);
        cancel_operation(app);
        return Vec::new();
    }
    match ke.code {
        KeyCode::Enter => {
            let password = std::mem::replace(&mut app.password, Zeroizing::new(String::new()));
            exit_input_mode(app);
            run_operation(app, Some(password))
        }
        KeyCode::Backspace => {
            app.password.pop();
            Vec::new()
        }
        _ => {
            if let Some(c) = typed_char(ke) {
                app.password.push(c);
            }
            Vec::new()
        }
    }
}
