//! Background execution of controller effects.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::sources::{AurClient, HttpTransport, PackageSource, RpcTransport};
use crate::state::{AppMessage, Effect, Package};

/// Spinner tick interval.
pub const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

/// What: Runs effects as tasks and reports each result as one [`AppMessage`].
///
/// Details:
/// - Package source calls are blocking and go through `spawn_blocking`.
/// - AUR calls are async and run as plain tasks.
/// - Tasks never touch application state; they only send messages.
pub struct Workers<T: RpcTransport = HttpTransport> {
    /// Local package database.
    source: Arc<dyn PackageSource>,
    /// AUR client, absent when AUR lookups are disabled.
    aur: Option<Arc<AurClient<T>>>,
    /// Result channel.
    msg_tx: mpsc::UnboundedSender<AppMessage>,
}

impl<T: RpcTransport + 'static> Workers<T> {
    /// Create workers reporting to `msg_tx`.
    pub fn new(
        source: Arc<dyn PackageSource>,
        aur: Option<Arc<AurClient<T>>>,
        msg_tx: mpsc::UnboundedSender<AppMessage>,
    ) -> Self {
        Self { source, aur, msg_tx }
    }

    /// What: Start the task for one effect.
    ///
    /// Details:
    /// - `HelperInstall` and `Quit` need the terminal and are handled by the
    ///   event loop; they are ignored here.
    pub fn execute(&self, effect: Effect) {
        match effect {
            Effect::LoadPackages => {
                let source = Arc::clone(&self.source);
                self.blocking(move || AppMessage::PackagesLoaded(load_installed(&*source)));
            }
            Effect::RefreshThenReload => {
                let source = Arc::clone(&self.source);
                self.blocking(move || {
                    if let Err(e) = source.refresh() {
                        tracing::warn!(error = %e, "repository refresh failed");
                    }
                    AppMessage::PackagesLoaded(load_installed(&*source))
                });
            }
            Effect::SearchSync { id, query } => {
                let source = Arc::clone(&self.source);
                self.blocking(move || {
                    tracing::debug!(id, query = %query, "sync search started");
                    let result = source.search(&query).map_err(|e| e.to_string());
                    tracing::debug!(id, ok = result.is_ok(), "sync search finished");
                    AppMessage::SyncSearchDone { id, result }
                });
            }
            Effect::SearchAur { id, query } => {
                let aur = self.aur.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    tracing::debug!(id, query = %query, "AUR search started");
                    let result = match aur {
                        Some(client) => client.search(&query).await,
                        None => Err("AUR disabled".to_string()),
                    };
                    if let Err(e) = &result {
                        tracing::warn!(id, error = %e, "AUR search failed");
                    }
                    let _ = tx.send(AppMessage::AurSearchDone { id, result });
                });
            }
            Effect::AurInfo { names } => {
                let Some(client) = self.aur.clone() else {
                    return;
                };
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    tracing::debug!(count = names.len(), "AUR info lookup started");
                    let result = client.info(&names).await;
                    let _ = tx.send(AppMessage::AurInfoDone(result));
                });
            }
            Effect::Install { name, password } => {
                let source = Arc::clone(&self.source);
                self.blocking(move || {
                    let names = [name.clone()];
                    let result = source
                        .install(&names, password.as_ref().map(|p| p.as_str()))
                        .map_err(|e| e.to_string());
                    AppMessage::OperationDone { name, result }
                });
            }
            Effect::Remove {
                name,
                cascade,
                password,
            } => {
                let source = Arc::clone(&self.source);
                self.blocking(move || {
                    let names = [name.clone()];
                    let result = source
                        .remove(&names, cascade, password.as_ref().map(|p| p.as_str()))
                        .map_err(|e| e.to_string());
                    AppMessage::OperationDone { name, result }
                });
            }
            Effect::ScheduleSpinner => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(SPINNER_INTERVAL).await;
                    let _ = tx.send(AppMessage::SpinnerTick);
                });
            }
            Effect::HelperInstall { .. } | Effect::Quit => {}
        }
    }

    /// Run `job` on the blocking pool and send its message.
    fn blocking<F>(&self, job: F)
    where
        F: FnOnce() -> AppMessage + Send + 'static,
    {
        let tx = self.msg_tx.clone();
        tokio::spawn(async move {
            match tokio::task::spawn_blocking(job).await {
                Ok(msg) => {
                    let _ = tx.send(msg);
                }
                Err(e) => tracing::error!(error = %e, "blocking worker panicked"),
            }
        });
    }
}

/// Installed packages with the error flattened to text.
fn load_installed(source: &dyn PackageSource) -> Result<Vec<Package>, String> {
    let result = source.installed().map_err(|e| e.to_string());
    match &result {
        Ok(pkgs) => tracing::debug!(count = pkgs.len(), "installed packages read"),
        Err(e) => tracing::warn!(error = %e, "reading installed packages failed"),
    }
    result
}
