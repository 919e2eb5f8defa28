//! Applying task results to the state.

use std::collections::HashSet;

use super::actions::{enter_remote_mode, foreign_lookup};
use crate::logic::JoinOutcome;
use crate::state::{AppMessage, AppState, Effect, OpState, Package, ViewMode};

/// Completion text of a successful helper run.
pub const HELPER_SUCCESS: &str = "AUR package installed successfully";
/// Completion error of a failed helper run.
pub const HELPER_FAILURE: &str = "AUR installation failed";

/// What: Apply one task result.
///
/// Inputs:
/// - `app`: Application state
/// - `msg`: Result delivered by a task
///
/// Output:
/// - Follow-up effects (re-search, AUR lookup, reload, next spinner tick)
pub fn handle_message(app: &mut AppState, msg: AppMessage) -> Vec<Effect> {
    match msg {
        AppMessage::PackagesLoaded(result) => packages_loaded(app, result),
        AppMessage::SyncSearchDone { id, result } => {
            let outcome = match app.search.as_mut() {
                Some(join) if join.id == id => join.record_sync(result),
                _ => {
                    tracing::debug!(id, "dropping stale sync search result");
                    return Vec::new();
                }
            };
            finish_search(app, outcome);
            Vec::new()
        }
        AppMessage::AurSearchDone { id, result } => {
            let outcome = match app.search.as_mut() {
                Some(join) if join.id == id => join.record_aur(result),
                _ => {
                    tracing::debug!(id, "dropping stale AUR search result");
                    return Vec::new();
                }
            };
            finish_search(app, outcome);
            Vec::new()
        }
        AppMessage::AurInfoDone(result) => {
            match result {
                Ok(names) => reclassify_aur(app, &names),
                Err(e) => tracing::warn!(error = %e, "AUR info lookup failed"),
            }
            Vec::new()
        }
        AppMessage::OperationDone { name, result } => {
            let (output, error) = match result {
                Ok(output) => (output, None),
                Err(e) => (String::new(), Some(e)),
            };
            complete_operation(app, &name, output, error)
        }
        AppMessage::HelperDone { name, result } => {
            let (output, error) = match result {
                Ok(true) => (HELPER_SUCCESS.to_string(), None),
                Ok(false) => (String::new(), Some(HELPER_FAILURE.to_string())),
                Err(e) => (String::new(), Some(e)),
            };
            complete_operation(app, &name, output, error)
        }
        AppMessage::SpinnerTick => {
            if app.needs_spinner() {
                app.spinner_frame = app.spinner_frame.wrapping_add(1);
                vec![Effect::ScheduleSpinner]
            } else {
                app.spinner_active = false;
                Vec::new()
            }
        }
    }
}

/// What: Store a fresh installed-package list.
///
/// Details:
/// - A failure before anything was loaded is fatal; later failures are notices.
/// - In the remote view only the snapshot is updated and the active query is
///   re-run under a new id.
fn packages_loaded(app: &mut AppState, result: Result<Vec<Package>, String>) -> Vec<Effect> {
    let packages = match result {
        Ok(packages) => packages,
        Err(e) => {
            tracing::warn!(error = %e, "loading installed packages failed");
            if app.loading {
                app.loading = false;
                app.fatal_error = Some(e);
            } else {
                app.error(format!("Failed to load packages: {e}"));
            }
            return Vec::new();
        }
    };
    tracing::info!(count = packages.len(), "installed packages loaded");
    app.loading = false;
    app.local_packages = packages;

    let mut effects = Vec::new();
    match app.view_mode {
        ViewMode::Local => rebuild_local_rows(app),
        ViewMode::Remote => {
            if let Some(query) = app.remote_query.clone() {
                effects.extend(enter_remote_mode(app, &query));
            }
        }
    }
    effects.extend(foreign_lookup(app));
    effects
}

/// What: Rebuild the table from the local snapshot.
///
/// Details:
/// - The active preset and text filter are re-applied; sort is kept.
fn rebuild_local_rows(app: &mut AppState) {
    let term = app
        .viewport
        .filter
        .terms
        .as_ref()
        .and_then(|t| t.first().cloned());
    let selected = app.viewport.selected_row;
    app.viewport.set_rows(app.local_packages.clone());
    app.viewport
        .apply_preset_filter(app.preset().map(|p| p.kind));
    if let Some(term) = term {
        app.viewport.apply_filter(&term);
    }
    app.viewport.select_index(selected.min(app.viewport.visible_len().saturating_sub(1)));
}

/// What: Show the merged search outcome once the join settles.
fn finish_search(app: &mut AppState, outcome: Option<JoinOutcome>) {
    let Some(outcome) = outcome else {
        return;
    };
    let query = app
        .search
        .take()
        .map(|j| j.query)
        .unwrap_or_default();
    match outcome {
        JoinOutcome::Results(mut packages) => {
            let installed: HashSet<&str> =
                app.local_packages.iter().map(|p| p.name.as_str()).collect();
            for pkg in packages.iter_mut().filter(|p| p.is_aur) {
                pkg.installed = installed.contains(pkg.name.as_str());
            }
            tracing::info!(query = %query, count = packages.len(), "remote search finished");
            app.remote_error = None;
            app.viewport.set_rows(packages);
        }
        JoinOutcome::Empty(message) => {
            tracing::info!(query = %query, message = %message, "remote search found nothing");
            app.remote_error = Some(message);
            app.viewport.set_rows(Vec::new());
        }
    }
    app.viewport.scroll_to_top();
}

/// What: Mark foreign packages the AUR knows as AUR packages.
///
/// Details:
/// - Rows are rebuilt only when something changed and the local view is shown.
fn reclassify_aur(app: &mut AppState, names: &HashSet<String>) {
    let mut changed = 0usize;
    for pkg in &mut app.local_packages {
        if !pkg.is_aur && names.contains(&pkg.name) {
            pkg.is_aur = true;
            pkg.repository = "aur".into();
            changed += 1;
        }
    }
    tracing::debug!(found = names.len(), changed, "AUR reclassification");
    if changed > 0 && app.view_mode == ViewMode::Local {
        rebuild_local_rows(app);
    }
}

/// What: Move a running operation to `Completed` and reload.
///
/// Details:
/// - Success or failure, the package database is refreshed and reloaded.
fn complete_operation(
    app: &mut AppState,
    name: &str,
    output: String,
    error: Option<String>,
) -> Vec<Effect> {
    let op = match std::mem::take(&mut app.op) {
        OpState::Running(op) => op,
        other => {
            tracing::warn!(package = %name, "completion without a running operation");
            app.op = other;
            return vec![Effect::RefreshThenReload];
        }
    };
    match &error {
        Some(e) => tracing::warn!(package = %name, kind = ?op.kind, error = %e, "operation failed"),
        None => tracing::info!(package = %name, kind = ?op.kind, "operation finished"),
    }
    app.op = OpState::Completed { op, output, error };
    vec![Effect::RefreshThenReload]
}
