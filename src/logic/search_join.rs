//! Join of the two concurrent remote searches (sync repositories and AUR).
//!
//! A join is created per search with a fresh request id. Each source reports
//! exactly once; the join finalizes the first time both sides are settled and
//! never again.

use std::collections::HashSet;

use crate::state::types::Package;

/// Result delivered by one search source.
pub type SourceResult = Result<Vec<Package>, String>;

/// Final outcome of a search join.
#[derive(Clone, Debug, PartialEq)]
pub enum JoinOutcome {
    /// Merged packages, primary source first.
    Results(Vec<Package>),
    /// Nothing was found; text to show instead.
    Empty(String),
}

/// Pending state of one remote search.
#[derive(Clone, Debug)]
pub struct SearchJoin {
    /// Request id this join accepts completions for.
    pub id: u64,
    /// Query text.
    pub query: String,
    /// Secondary source participates.
    aur_enabled: bool,
    /// Primary (sync repository) result, once reported.
    sync: Option<SourceResult>,
    /// Secondary (AUR) result, once reported.
    aur: Option<SourceResult>,
    /// Outcome was already produced.
    finalized: bool,
}

impl SearchJoin {
    /// What: Start a join for a new search.
    ///
    /// Inputs:
    /// - `id`: Request id of the search
    /// - `query`: Query text
    /// - `aur_enabled`: Whether an AUR result will arrive
    #[must_use]
    pub fn new(id: u64, query: impl Into<String>, aur_enabled: bool) -> Self {
        Self {
            id,
            query: query.into(),
            aur_enabled,
            sync: None,
            aur: None,
            finalized: false,
        }
    }

    /// What: Record the primary source's completion.
    ///
    /// Output:
    /// - `Some(outcome)` exactly once, when this completion settles the join
    pub fn record_sync(&mut self, result: SourceResult) -> Option<JoinOutcome> {
        if self.sync.is_none() {
            self.sync = Some(result);
        }
        self.try_finalize()
    }

    /// What: Record the secondary source's completion.
    ///
    /// Output:
    /// - `Some(outcome)` exactly once, when this completion settles the join
    pub fn record_aur(&mut self, result: SourceResult) -> Option<JoinOutcome> {
        if self.aur.is_none() {
            self.aur = Some(result);
        }
        self.try_finalize()
    }

    /// Both sides are settled.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.sync.is_some() && (self.aur.is_some() || !self.aur_enabled)
    }

    /// Produce the outcome if the join is settled and has not finalized yet.
    fn try_finalize(&mut self) -> Option<JoinOutcome> {
        if self.finalized || !self.is_complete() {
            return None;
        }
        self.finalized = true;
        let (primary, primary_err) = split(self.sync.take());
        let (secondary, secondary_err) = split(self.aur.take());
        if let Some(err) = &secondary_err {
            tracing::warn!(query = %self.query, error = %err, "AUR search failed");
        }
        let merged = merge_search_results(primary, secondary);
        if !merged.is_empty() {
            return Some(JoinOutcome::Results(merged));
        }
        Some(JoinOutcome::Empty(primary_err.unwrap_or_else(|| {
            format!("no packages found for: {}", self.query)
        })))
    }
}

/// Split a reported result into packages and error text.
fn split(result: Option<SourceResult>) -> (Vec<Package>, Option<String>) {
    match result {
        Some(Ok(pkgs)) => (pkgs, None),
        Some(Err(e)) => (Vec::new(), Some(e)),
        None => (Vec::new(), None),
    }
}

/// What: Union two result sets with the primary winning name collisions.
///
/// Inputs:
/// - `primary`: Sync repository results
/// - `secondary`: AUR results
///
/// Output:
/// - Primary entries in order, then secondary entries whose name is not in primary
#[must_use]
pub fn merge_search_results(primary: Vec<Package>, secondary: Vec<Package>) -> Vec<Package> {
    if secondary.is_empty() {
        return primary;
    }
    if primary.is_empty() {
        return secondary;
    }
    let mut seen: HashSet<String> = primary.iter().map(|p| p.name.clone()).collect();
    let mut merged = primary;
    for pkg in secondary {
        if seen.insert(pkg.name.clone()) {
            merged.push(pkg);
        }
    }
    merged
}
