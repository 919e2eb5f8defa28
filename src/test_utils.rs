//! Test utilities for common test setup.
//!
//! This module provides shared test helpers used across multiple test modules.

use crate::state::types::Package;

/// What: Build bare packages with the given names.
///
/// Inputs:
/// - `names`: Package names in arena order
///
/// Output:
/// - Installed packages from `extra` with everything else defaulted
pub fn named_packages(names: &[&str]) -> Vec<Package> {
    names
        .iter()
        .map(|n| Package {
            name: (*n).to_string(),
            version: "1.0-1".into(),
            repository: "extra".into(),
            installed: true,
            ..Package::default()
        })
        .collect()
}

/// What: Build `count` packages whose names sort in numeric order.
///
/// Output:
/// - Packages named `pkg000`, `pkg001`, ...
pub fn numbered_packages(count: usize) -> Vec<Package> {
    let names: Vec<String> = (0..count).map(|i| format!("pkg{i:03}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    named_packages(&refs)
}
