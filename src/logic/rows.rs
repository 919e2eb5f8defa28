//! Projection of packages into pre-formatted table rows.

use std::collections::HashMap;

use crate::state::types::{ColumnKind, Package, Row};

/// What: Format a byte count with binary units.
///
/// Inputs:
/// - `bytes`: Size in bytes
///
/// Output:
/// - `"512 B"`, `"1.5 KB"`, `"3.2 MB"`, ...
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    const UNIT: u64 = 1024;
    if bytes < UNIT {
        return format!("{bytes} B");
    }
    let mut div = UNIT;
    let mut exp = 0usize;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    let suffix = ['K', 'M', 'G', 'T', 'P', 'E'][exp.min(5)];
    format!("{:.1} {suffix}B", bytes as f64 / div as f64)
}

/// Render a boolean as `Yes`/`No`.
#[must_use]
pub const fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

/// What: Project one package into a row.
///
/// Inputs:
/// - `pkg`: Source package
/// - `index`: Position of the package in the arena
///
/// Output:
/// - Row whose Index cell is the 1-based load position
#[must_use]
pub fn package_to_row(pkg: &Package, index: usize) -> Row {
    let mut cells = HashMap::with_capacity(10);
    cells.insert(ColumnKind::Index, (index + 1).to_string());
    cells.insert(ColumnKind::Installed, yes_no(pkg.installed).to_string());
    cells.insert(ColumnKind::Repository, pkg.repository.clone());
    cells.insert(ColumnKind::Name, pkg.name.clone());
    cells.insert(ColumnKind::Version, pkg.version.clone());
    cells.insert(ColumnKind::Size, format_size(pkg.installed_size));
    cells.insert(ColumnKind::Dependencies, pkg.dependency_count().to_string());
    cells.insert(
        ColumnKind::InstallDate,
        pkg.install_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    cells.insert(ColumnKind::Groups, pkg.groups.join(", "));
    cells.insert(ColumnKind::Description, pkg.description.clone());
    Row {
        package: index,
        cells,
        filtered: false,
    }
}

/// Project a whole package arena, preserving order.
#[must_use]
pub fn packages_to_rows(packages: &[Package]) -> Vec<Row> {
    packages
        .iter()
        .enumerate()
        .map(|(i, p)| package_to_row(p, i))
        .collect()
}
