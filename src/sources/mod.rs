//! Package data sources.
//!
//! The controller only talks to [`PackageSource`]. [`PacmanSource`] shells
//! out to pacman; [`MemorySource`] keeps everything in memory for tests and
//! demos. The AUR is reached through [`aur::AurClient`].

pub mod aur;
pub mod cache;
pub mod memory;
pub mod pacman;

pub use aur::{AurClient, HttpTransport, RpcTransport};
pub use cache::TtlCache;
pub use memory::MemorySource;
pub use pacman::PacmanSource;

use crate::state::types::Package;

/// Boxed error shared by source implementations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Blocking access to the local package database.
///
/// Details:
/// - Calls may block on subprocesses; the runtime always invokes them from
///   `tokio::task::spawn_blocking`.
/// - Every call may fail; failures are reported as values.
pub trait PackageSource: Send + Sync {
    /// Every installed package with install metadata filled in.
    ///
    /// # Errors
    /// - Returns `Err` when the database cannot be queried
    fn installed(&self) -> Result<Vec<Package>>;

    /// Search the sync repositories.
    ///
    /// # Errors
    /// - Returns `Err` when the search cannot run
    fn search(&self, query: &str) -> Result<Vec<Package>>;

    /// Install packages from the sync repositories.
    ///
    /// # Errors
    /// - Returns `Err` when the transaction fails
    fn install(&self, names: &[String], credential: Option<&str>) -> Result<String>;

    /// Remove packages, with their unneeded dependencies when `cascade` is set.
    ///
    /// # Errors
    /// - Returns `Err` when the transaction fails
    fn remove(&self, names: &[String], cascade: bool, credential: Option<&str>)
    -> Result<String>;

    /// Re-read cached repository metadata.
    ///
    /// # Errors
    /// - Returns `Err` when the metadata cannot be read
    fn refresh(&self) -> Result<()>;
}
