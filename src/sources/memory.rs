//! In-memory [`PackageSource`] with scripted failures.

use std::sync::Mutex;

use super::{PackageSource, Result};
use crate::state::types::{InstallReason, Package};

/// Mutable state behind the lock.
#[derive(Debug, Default)]
struct Inner {
    /// Installed packages.
    installed: Vec<Package>,
    /// Packages available for search and install.
    catalog: Vec<Package>,
    /// Error returned by `installed`.
    fail_installed: Option<String>,
    /// Error returned by `search`.
    fail_search: Option<String>,
    /// Error returned by `install` and `remove`.
    fail_transaction: Option<String>,
    /// Calls in order, as `op:arg`.
    calls: Vec<String>,
}

/// Package source that keeps everything in memory.
#[derive(Debug, Default)]
pub struct MemorySource {
    /// Guarded state.
    inner: Mutex<Inner>,
}

impl MemorySource {
    /// What: Source with installed packages and a searchable catalog.
    ///
    /// Inputs:
    /// - `installed`: Packages reported by `installed()`
    /// - `catalog`: Packages found by `search()` and installable
    #[must_use]
    pub fn new(installed: Vec<Package>, catalog: Vec<Package>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                installed,
                catalog,
                ..Inner::default()
            }),
        }
    }

    /// Make `installed()` fail with `message`.
    #[must_use]
    pub fn failing_installed(self, message: &str) -> Self {
        self.with(|i| i.fail_installed = Some(message.to_string()));
        self
    }

    /// Make `search()` fail with `message`.
    #[must_use]
    pub fn failing_search(self, message: &str) -> Self {
        self.with(|i| i.fail_search = Some(message.to_string()));
        self
    }

    /// Make `install()` and `remove()` fail with `message`.
    #[must_use]
    pub fn failing_transactions(self, message: &str) -> Self {
        self.with(|i| i.fail_transaction = Some(message.to_string()));
        self
    }

    /// Recorded calls, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|i| i.calls.clone())
            .unwrap_or_default()
    }

    /// Run `f` under the lock.
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> Option<R> {
        self.inner.lock().ok().map(|mut g| f(&mut g))
    }
}

impl PackageSource for MemorySource {
    fn installed(&self) -> Result<Vec<Package>> {
        self.with(|i| -> Result<Vec<Package>> {
            i.calls.push("installed".into());
            i.fail_installed
                .clone()
                .map_or_else(|| Ok(i.installed.clone()), |e| Err(e.into()))
        })
        .unwrap_or_else(|| Err("memory source lock poisoned".into()))
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        self.with(|i| -> Result<Vec<Package>> {
            i.calls.push(format!("search:{query}"));
            if let Some(e) = &i.fail_search {
                return Err(e.clone().into());
            }
            let q = query.to_lowercase();
            Ok(i.catalog
                .iter()
                .filter(|p| {
                    p.name.to_lowercase().contains(&q) || p.description.to_lowercase().contains(&q)
                })
                .map(|p| Package {
                    installed: i.installed.iter().any(|x| x.name == p.name),
                    ..p.clone()
                })
                .collect())
        })
        .unwrap_or_else(|| Err("memory source lock poisoned".into()))
    }

    fn install(&self, names: &[String], credential: Option<&str>) -> Result<String> {
        self.with(|i| -> Result<String> {
            i.calls.push(format!(
                "install:{}:{}",
                names.join(","),
                if credential.is_some() { "pw" } else { "root" }
            ));
            if let Some(e) = &i.fail_transaction {
                return Err(e.clone().into());
            }
            for name in names {
                let Some(pkg) = i.catalog.iter().find(|p| &p.name == name).cloned() else {
                    return Err(format!("target not found: {name}").into());
                };
                i.installed.retain(|p| &p.name != name);
                i.installed.push(Package {
                    installed: true,
                    install_reason: InstallReason::Explicit,
                    ..pkg
                });
            }
            Ok(format!("installed {}", names.join(" ")))
        })
        .unwrap_or_else(|| Err("memory source lock poisoned".into()))
    }

    fn remove(&self, names: &[String], cascade: bool, credential: Option<&str>) -> Result<String> {
        self.with(|i| -> Result<String> {
            i.calls.push(format!(
                "remove:{}:{}:{}",
                names.join(","),
                cascade,
                if credential.is_some() { "pw" } else { "root" }
            ));
            if let Some(e) = &i.fail_transaction {
                return Err(e.clone().into());
            }
            let before = i.installed.len();
            i.installed.retain(|p| !names.contains(&p.name));
            if i.installed.len() == before {
                return Err(format!("target not found: {}", names.join(" ")).into());
            }
            Ok(format!("removed {}", names.join(" ")))
        })
        .unwrap_or_else(|| Err("memory source lock poisoned".into()))
    }

    fn refresh(&self) -> Result<()> {
        self.with(|i| i.calls.push("refresh".into()));
        Ok(())
    }
}
