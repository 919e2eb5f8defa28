//! Event handling: terminal events and task results mutate [`AppState`] and
//! yield [`Effect`]s for the runtime to execute.
//!
//! Nothing in here blocks or spawns; every handler is a plain function over
//! the state so it can be driven directly from tests.

use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::{AppState, Effect, InputMode};

mod actions;
mod input;
mod messages;
mod mouse;
mod normal;

pub use actions::{enter_remote_mode, execute_command, exit_remote_mode};
pub use messages::handle_message;

/// What: Dispatch one terminal event.
///
/// Inputs:
/// - `ev`: crossterm event
/// - `app`: Mutable application state
///
/// Output:
/// - Effects to execute, in order; [`Effect::Quit`] ends the event loop
pub fn handle_event(ev: &CEvent, app: &mut AppState) -> Vec<Effect> {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => handle_key(*ke, app),
        CEvent::Mouse(me) if app.fatal_error.is_none() => {
            mouse::handle_mouse(*me, app);
            Vec::new()
        }
        CEvent::Resize(_, height) => {
            handle_resize(app, *height);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

/// What: Dispatch one key press by input mode.
pub fn handle_key(ke: KeyEvent, app: &mut AppState) -> Vec<Effect> {
    if app.fatal_error.is_some() {
        return if is_quit_key(ke) {
            vec![Effect::Quit]
        } else {
            Vec::new()
        };
    }
    match app.mode {
        InputMode::Normal => normal::handle_normal_key(ke, app),
        InputMode::Command => input::handle_command_key(ke, app),
        InputMode::Filter => input::handle_filter_key(ke, app),
        InputMode::Password => input::handle_password_key(ke, app),
    }
}

/// What: Fit the viewport to a new terminal height.
///
/// Details:
/// - One line for the header and one for the status bar.
pub fn handle_resize(app: &mut AppState, height: u16) {
    app.viewport.set_height(usize::from(height).saturating_sub(2));
}

/// `q` or Ctrl+C.
fn is_quit_key(ke: KeyEvent) -> bool {
    match ke.code {
        KeyCode::Char('q') => true,
        KeyCode::Char('c') => ke.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Ctrl+C, treated as Esc in input modes.
fn is_ctrl_c(ke: KeyEvent) -> bool {
    ke.code == KeyCode::Char('c') && ke.modifiers.contains(KeyModifiers::CONTROL)
}
