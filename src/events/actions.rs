//! State transitions shared by key handlers and task results.

use zeroize::{Zeroize, Zeroizing};

use crate::install::NO_HELPER_ERROR;
use crate::logic::{Command, PresetKind, SearchJoin};
use crate::state::{
    AppState, ColumnKind, Effect, InputMode, OpKind, OpState, Operation, ViewMode,
};
use crate::theme::load_theme;

/// What: Switch to an input mode with an empty buffer holding its prefix.
pub(super) fn enter_input_mode(app: &mut AppState, mode: InputMode) {
    app.mode = mode;
    app.buffer.clear();
    match mode {
        InputMode::Command => app.buffer.push(':'),
        InputMode::Filter => app.buffer.push('/'),
        InputMode::Normal | InputMode::Password => {}
    }
}

/// Back to Normal mode, dropping the buffer.
pub(super) fn exit_input_mode(app: &mut AppState) {
    app.mode = InputMode::Normal;
    app.buffer.clear();
}

/// What: Run a parsed command.
///
/// Inputs:
/// - `app`: Application state
/// - `command`: Intent from [`crate::logic::parse_command`]
///
/// Output:
/// - Effects the command needs; parse errors become an error notice
pub fn execute_command(app: &mut AppState, command: Command) -> Vec<Effect> {
    tracing::debug!(command = ?command, "executing command");
    match command {
        Command::Noop => {}
        Command::Quit => return vec![Effect::Quit],
        Command::GotoLine(line) => app.viewport.scroll_to_line(line),
        Command::ScrollTop => app.viewport.scroll_to_top(),
        Command::ScrollEnd => app.viewport.scroll_to_bottom(),
        Command::Preset(kind) => return select_preset(app, kind),
        Command::Search(query) => return enter_remote_mode(app, &query),
        Command::Install => {
            if app.view_mode != ViewMode::Remote {
                app.error("Install command only works in search mode");
                return Vec::new();
            }
            return initiate_operation(app, OpKind::Install);
        }
        Command::Remove => {
            if app.view_mode != ViewMode::Local {
                app.error("Remove command only works in local mode");
                return Vec::new();
            }
            return initiate_operation(app, OpKind::Remove);
        }
        Command::Theme(name) => switch_theme(app, &name),
        Command::Error(message) => app.error(message),
    }
    Vec::new()
}

/// Load a theme and apply the configured overrides on top.
fn switch_theme(app: &mut AppState, name: &str) {
    match load_theme(name) {
        Ok(theme) => {
            app.theme = theme.with_colors(&app.theme_overrides);
            tracing::info!(theme = %name, "switched theme");
            app.info(format!("Theme: {name}"));
        }
        Err(e) => {
            tracing::warn!(theme = %name, error = %e, "theme switch failed");
            app.error(e);
        }
    }
}

/// What: Activate the preset at `index`.
///
/// Details:
/// - Resets sort to Name ascending and clears the text filter first.
/// - The AUR preset triggers a lookup of foreign packages.
pub(super) fn apply_preset(app: &mut AppState, index: usize) -> Vec<Effect> {
    let Some(kind) = app.presets.get(index).map(|p| p.kind) else {
        return Vec::new();
    };
    app.current_preset = index;
    app.viewport.apply_sort(ColumnKind::Name, false);
    app.viewport.clear_filter();
    app.viewport.apply_preset_filter(Some(kind));
    if kind == PresetKind::Aur {
        return foreign_lookup(app);
    }
    Vec::new()
}

/// `:p <name>` in local mode.
fn select_preset(app: &mut AppState, kind: PresetKind) -> Vec<Effect> {
    if app.view_mode == ViewMode::Remote {
        app.error("Presets only apply to installed packages");
        return Vec::new();
    }
    match app.presets.iter().position(|p| p.kind == kind) {
        Some(index) => apply_preset(app, index),
        None => Vec::new(),
    }
}

/// Tab: cycle to the next preset.
pub(super) fn next_preset(app: &mut AppState) -> Vec<Effect> {
    if app.view_mode == ViewMode::Remote || app.presets.is_empty() {
        return Vec::new();
    }
    apply_preset(app, (app.current_preset + 1) % app.presets.len())
}

/// What: Ask the AUR which foreign packages it carries.
///
/// Output:
/// - An [`Effect::AurInfo`] when AUR lookups are enabled and there are
///   unclassified foreign packages
pub(super) fn foreign_lookup(app: &AppState) -> Vec<Effect> {
    if !app.aur_enabled {
        return Vec::new();
    }
    let names: Vec<String> = app
        .local_packages
        .iter()
        .filter(|p| p.is_foreign && !p.is_aur)
        .map(|p| p.name.clone())
        .collect();
    if names.is_empty() {
        return Vec::new();
    }
    vec![Effect::AurInfo { names }]
}

/// Start the spinner chain unless one is already alive.
pub(super) fn start_spinner(app: &mut AppState) -> Option<Effect> {
    if app.spinner_active || !app.needs_spinner() {
        return None;
    }
    app.spinner_active = true;
    Some(Effect::ScheduleSpinner)
}

/// What: Start a remote search and switch to the remote view.
///
/// Inputs:
/// - `app`: Application state
/// - `query`: Search text
///
/// Output:
/// - Search effects for both sources plus the spinner
///
/// Details:
/// - Any earlier join is dropped; its late completions no longer match the id.
/// - The local snapshot is kept untouched so leaving remote mode restores it.
pub fn enter_remote_mode(app: &mut AppState, query: &str) -> Vec<Effect> {
    app.last_search_id += 1;
    let id = app.last_search_id;
    tracing::info!(id, query = %query, aur = app.aur_enabled, "starting remote search");
    app.search = Some(SearchJoin::new(id, query, app.aur_enabled));
    app.view_mode = ViewMode::Remote;
    app.remote_query = Some(query.to_string());
    app.remote_error = None;
    app.show_detail = false;
    app.set_remote_columns(true);
    app.viewport.set_rows(Vec::new());
    app.viewport.apply_sort(ColumnKind::Name, false);
    app.viewport.scroll_to_top();

    let mut effects = vec![Effect::SearchSync {
        id,
        query: query.to_string(),
    }];
    if app.aur_enabled {
        effects.push(Effect::SearchAur {
            id,
            query: query.to_string(),
        });
    }
    effects.extend(start_spinner(app));
    effects
}

/// What: Leave the remote view and restore the installed packages.
///
/// Details:
/// - Sort resets to Name ascending, the filter is cleared, the selection goes
///   to the top and the first preset is re-applied.
pub fn exit_remote_mode(app: &mut AppState) {
    tracing::debug!("leaving remote mode");
    app.view_mode = ViewMode::Local;
    app.search = None;
    app.remote_query = None;
    app.remote_error = None;
    app.show_detail = false;
    app.set_remote_columns(false);
    app.viewport.set_rows(app.local_packages.clone());
    app.current_preset = 0;
    app.viewport.apply_sort(ColumnKind::Name, false);
    app.viewport.clear_filter();
    app.viewport
        .apply_preset_filter(app.presets.first().map(|p| p.kind));
    app.viewport.scroll_to_top();
}

/// What: Ask for confirmation to install or remove the selected package.
///
/// Details:
/// - Refused while another operation is pending or running.
pub(super) fn initiate_operation(app: &mut AppState, kind: OpKind) -> Vec<Effect> {
    if matches!(
        app.op,
        OpState::PendingConfirm(_) | OpState::PasswordPrompt(_) | OpState::Running(_)
    ) {
        app.error("Another operation is in progress");
        return Vec::new();
    }
    let Some(pkg) = app.viewport.selected_package() else {
        app.error("No package selected");
        return Vec::new();
    };
    let op = Operation {
        kind,
        package: pkg.name.clone(),
        is_aur: kind == OpKind::Install && pkg.is_aur,
    };
    tracing::debug!(package = %op.package, kind = ?op.kind, aur = op.is_aur, "confirm requested");
    app.op = OpState::PendingConfirm(op);
    Vec::new()
}

/// Esc on a confirmation or password prompt.
pub(super) fn cancel_operation(app: &mut AppState) {
    if let Some(op) = app.op.operation() {
        tracing::debug!(package = %op.package, "operation cancelled");
    }
    app.op = OpState::Idle;
    app.password.zeroize();
}

/// What: Confirm the pending operation.
///
/// Details:
/// - AUR installs go straight to the helper, or complete with an error when
///   no helper exists.
/// - Unprivileged processes ask for the sudo password first.
pub(super) fn confirm_operation(app: &mut AppState) -> Vec<Effect> {
    let OpState::PendingConfirm(op) = std::mem::take(&mut app.op) else {
        return Vec::new();
    };
    if op.is_aur {
        let Some(helper) = app.helper.clone() else {
            tracing::warn!(package = %op.package, "no AUR helper available");
            app.op = OpState::Completed {
                op,
                output: String::new(),
                error: Some(NO_HELPER_ERROR.to_string()),
            };
            return vec![Effect::RefreshThenReload];
        };
        let name = op.package.clone();
        app.op = OpState::Running(op);
        return vec![Effect::HelperInstall { helper, name }];
    }
    if app.privileged {
        app.op = OpState::PendingConfirm(op);
        return run_operation(app, None);
    }
    app.op = OpState::PasswordPrompt(op);
    app.password.zeroize();
    app.mode = InputMode::Password;
    Vec::new()
}

/// What: Launch the confirmed install or remove.
///
/// Inputs:
/// - `password`: sudo password, `None` when privileged
pub(super) fn run_operation(
    app: &mut AppState,
    password: Option<Zeroizing<String>>,
) -> Vec<Effect> {
    let op = match std::mem::take(&mut app.op) {
        OpState::PendingConfirm(op) | OpState::PasswordPrompt(op) => op,
        other => {
            app.op = other;
            return Vec::new();
        }
    };
    tracing::info!(package = %op.package, kind = ?op.kind, "running operation");
    let name = op.package.clone();
    let effect = match op.kind {
        OpKind::Install => Effect::Install { name, password },
        OpKind::Remove => Effect::Remove {
            name,
            cascade: false,
            password,
        },
    };
    app.op = OpState::Running(op);
    let mut effects = vec![effect];
    effects.extend(start_spinner(app));
    effects
}
