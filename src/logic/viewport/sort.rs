use std::cmp::Ordering;

use super::Viewport;
use crate::state::types::{ColumnKind, Package, Row};

/// What: Compare two rows for the given sort column.
///
/// Inputs:
/// - `packages`: Arena the rows index into
/// - `a`, `b`: Rows to compare
/// - `column`: Sort key
///
/// Output:
/// - Total ordering, ascending
///
/// Details:
/// - Name, repository, and groups compare case-insensitively; version compares
///   as a raw string; size and dependency count numerically; install date
///   chronologically. Other columns fall back to name.
/// - Ties break on case-insensitive name, then exact name, then arena index,
///   so reversing the result gives exactly the descending order.
#[must_use]
pub fn compare_rows(packages: &[Package], a: &Row, b: &Row, column: ColumnKind) -> Ordering {
    let (Some(pa), Some(pb)) = (packages.get(a.package), packages.get(b.package)) else {
        return a.package.cmp(&b.package);
    };
    let primary = match column {
        ColumnKind::Repository => cmp_fold(&pa.repository, &pb.repository),
        ColumnKind::Groups => cmp_fold(a.cell(ColumnKind::Groups), b.cell(ColumnKind::Groups)),
        ColumnKind::Version => pa.version.cmp(&pb.version),
        ColumnKind::Size => pa.installed_size.cmp(&pb.installed_size),
        ColumnKind::Dependencies => pa.dependency_count().cmp(&pb.dependency_count()),
        ColumnKind::InstallDate => pa.install_date.cmp(&pb.install_date),
        ColumnKind::Installed => pa.installed.cmp(&pb.installed),
        ColumnKind::Name | ColumnKind::Index | ColumnKind::Description => Ordering::Equal,
    };
    primary
        .then_with(|| cmp_fold(&pa.name, &pb.name))
        .then_with(|| pa.name.cmp(&pb.name))
        .then_with(|| a.package.cmp(&b.package))
}

/// Case-insensitive string comparison.
fn cmp_fold(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

impl Viewport {
    /// What: Sort by `column`.
    ///
    /// Inputs:
    /// - `column`: Sort key
    /// - `reverse`: Descending when `true`
    pub fn apply_sort(&mut self, column: ColumnKind, reverse: bool) {
        self.sort_column = column;
        self.sort_reverse = reverse;
        self.sort_rows();
    }

    /// Flip the sort direction, keeping the key.
    pub fn toggle_sort(&mut self) {
        self.sort_reverse = !self.sort_reverse;
        self.sort_rows();
    }

    /// What: Sort by the selected column.
    ///
    /// Details:
    /// - Same column flips direction; a new column starts ascending.
    /// - Unsortable columns are ignored.
    pub fn sort_selected_column(&mut self) {
        let Some(col) = self.columns.get(self.selected_col) else {
            return;
        };
        if !col.sortable {
            return;
        }
        let kind = col.kind;
        if kind == self.sort_column {
            self.toggle_sort();
        } else {
            self.apply_sort(kind, false);
        }
    }

    /// Re-sort `all_rows` and rebuild the visible subsequence.
    pub(super) fn sort_rows(&mut self) {
        let column = self.sort_column;
        let reverse = self.sort_reverse;
        let packages = &self.packages;
        self.all_rows.sort_by(|a, b| {
            let ord = compare_rows(packages, a, b, column);
            if reverse { ord.reverse() } else { ord }
        });
        self.recompute_visible();
    }
}
