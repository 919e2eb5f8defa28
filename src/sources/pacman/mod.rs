//! [`PackageSource`] backed by the `pacman` binary.

pub mod parse;

use std::collections::HashMap;
use std::sync::RwLock;

use super::{PackageSource, Result};
use crate::install::command::run_privileged;
use crate::state::types::Package;
use crate::util::pacman::{run_pacman, run_pacman_allow_empty};
use parse::{parse_name_list, parse_query_info, parse_sync_list, parse_sync_search, parse_updates};

/// Package source that queries and drives pacman.
#[derive(Debug)]
pub struct PacmanSource {
    /// Describe transactions instead of running them.
    dry_run: bool,
    /// Sync repository of every known package, from `pacman -Sl`.
    repos: RwLock<HashMap<String, String>>,
}

impl PacmanSource {
    /// What: Create the source and read repository membership.
    ///
    /// Inputs:
    /// - `dry_run`: When `true`, install/remove return the command instead of running it
    ///
    /// # Errors
    /// - Returns `Err` when pacman is missing or `pacman -Sl` fails
    pub fn new(dry_run: bool) -> Result<Self> {
        if which::which("pacman").is_err() {
            return Err("pacman not found in PATH".into());
        }
        let source = Self {
            dry_run,
            repos: RwLock::new(HashMap::new()),
        };
        source.refresh()?;
        Ok(source)
    }

    /// Repository for `name`, `local` when no sync repository carries it.
    fn repo_of(&self, name: &str) -> Option<String> {
        self.repos.read().ok()?.get(name).cloned()
    }
}

impl PackageSource for PacmanSource {
    fn installed(&self) -> Result<Vec<Package>> {
        let mut pkgs = parse_query_info(&run_pacman(&["-Qi"])?);
        let orphans = parse_name_list(&run_pacman_allow_empty(&["-Qdtq"])?);
        let foreign = parse_name_list(&run_pacman_allow_empty(&["-Qmq"])?);
        let updates = parse_updates(&run_pacman_allow_empty(&["-Qu"])?);
        for pkg in &mut pkgs {
            pkg.is_orphan = orphans.contains(&pkg.name);
            pkg.is_foreign = foreign.contains(&pkg.name);
            pkg.repository = self.repo_of(&pkg.name).unwrap_or_else(|| "local".into());
            if let Some(new) = updates.get(&pkg.name) {
                pkg.has_update = true;
                pkg.new_version.clone_from(new);
            }
        }
        tracing::debug!(
            count = pkgs.len(),
            orphans = orphans.len(),
            foreign = foreign.len(),
            updates = updates.len(),
            "loaded installed packages"
        );
        Ok(pkgs)
    }

    fn search(&self, query: &str) -> Result<Vec<Package>> {
        let mut args = vec!["-Ss", "--"];
        args.extend(query.split_whitespace());
        Ok(parse_sync_search(&run_pacman_allow_empty(&args)?))
    }

    fn install(&self, names: &[String], credential: Option<&str>) -> Result<String> {
        let mut argv: Vec<String> = ["pacman", "-S", "--noconfirm"].map(String::from).to_vec();
        argv.extend(names.iter().cloned());
        run_privileged(&argv, credential, self.dry_run)
    }

    fn remove(&self, names: &[String], cascade: bool, credential: Option<&str>) -> Result<String> {
        let flag = if cascade { "-Rs" } else { "-R" };
        let mut argv: Vec<String> = ["pacman", flag, "--noconfirm"].map(String::from).to_vec();
        argv.extend(names.iter().cloned());
        run_privileged(&argv, credential, self.dry_run)
    }

    fn refresh(&self) -> Result<()> {
        let repos = parse_sync_list(&run_pacman(&["-Sl"])?);
        tracing::debug!(count = repos.len(), "refreshed sync repository index");
        if let Ok(mut g) = self.repos.write() {
            *g = repos;
        }
        Ok(())
    }
}
