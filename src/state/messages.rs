//! Task launch requests and task results exchanged with the runtime.

use std::collections::HashSet;
use std::fmt;

use zeroize::Zeroizing;

use super::types::Package;

/// Work the controller asks the runtime to start.
///
/// Handlers return effects instead of spawning tasks themselves so the
/// controller stays synchronous and testable.
pub enum Effect {
    /// Load installed packages.
    LoadPackages,
    /// Re-read repository metadata, then load installed packages.
    RefreshThenReload,
    /// Search the sync repositories.
    SearchSync {
        /// Request id of the search join.
        id: u64,
        /// Query text.
        query: String,
    },
    /// Search the AUR.
    SearchAur {
        /// Request id of the search join.
        id: u64,
        /// Query text.
        query: String,
    },
    /// Ask the AUR which of these names it knows.
    AurInfo {
        /// Candidate names.
        names: Vec<String>,
    },
    /// Install from the sync repositories.
    Install {
        /// Package name.
        name: String,
        /// sudo password; `None` when already privileged.
        password: Option<Zeroizing<String>>,
    },
    /// Remove an installed package.
    Remove {
        /// Package name.
        name: String,
        /// Also remove unneeded dependencies.
        cascade: bool,
        /// sudo password; `None` when already privileged.
        password: Option<Zeroizing<String>>,
    },
    /// Hand the terminal to the AUR helper.
    HelperInstall {
        /// Helper binary.
        helper: String,
        /// Package name.
        name: String,
    },
    /// Start the spinner tick chain.
    ScheduleSpinner,
    /// Leave the event loop.
    Quit,
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadPackages => f.write_str("LoadPackages"),
            Self::RefreshThenReload => f.write_str("RefreshThenReload"),
            Self::SearchSync { id, query } => write!(f, "SearchSync({id}, {query:?})"),
            Self::SearchAur { id, query } => write!(f, "SearchAur({id}, {query:?})"),
            Self::AurInfo { names } => write!(f, "AurInfo({} names)", names.len()),
            Self::Install { name, password } => {
                write!(f, "Install({name:?}, password: {})", password.is_some())
            }
            Self::Remove {
                name,
                cascade,
                password,
            } => write!(
                f,
                "Remove({name:?}, cascade: {cascade}, password: {})",
                password.is_some()
            ),
            Self::HelperInstall { helper, name } => write!(f, "HelperInstall({helper}, {name:?})"),
            Self::ScheduleSpinner => f.write_str("ScheduleSpinner"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// Result of a background task, consumed by the event loop.
#[derive(Clone, Debug)]
pub enum AppMessage {
    /// Installed package list.
    PackagesLoaded(Result<Vec<Package>, String>),
    /// Sync repository search finished.
    SyncSearchDone {
        /// Request id the search was started with.
        id: u64,
        /// Packages or error text.
        result: Result<Vec<Package>, String>,
    },
    /// AUR search finished.
    AurSearchDone {
        /// Request id the search was started with.
        id: u64,
        /// Packages or error text.
        result: Result<Vec<Package>, String>,
    },
    /// AUR info lookup finished.
    AurInfoDone(Result<HashSet<String>, String>),
    /// Install or remove finished.
    OperationDone {
        /// Package name.
        name: String,
        /// Command output or error text.
        result: Result<String, String>,
    },
    /// AUR helper exited.
    HelperDone {
        /// Package name.
        name: String,
        /// Exit success, or spawn error text.
        result: Result<bool, String>,
    },
    /// Spinner interval elapsed.
    SpinnerTick,
}
