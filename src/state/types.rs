//! Package records, row projections, and table column descriptors.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDateTime;

/// Why a package is installed on the system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InstallReason {
    /// Installed explicitly by the user.
    Explicit,
    /// Pulled in as a dependency of another package.
    Dependency,
    /// Not installed, or the reason is not known.
    #[default]
    Unknown,
}

impl fmt::Display for InstallReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Explicit => "Explicit",
            Self::Dependency => "Dependency",
            Self::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// A single package as reported by pacman or the AUR.
///
/// Packages are recreated wholesale on every load; nothing patches them in
/// place except foreign-package reclassification, which rebuilds the list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Package {
    /// Unique package name.
    pub name: String,
    /// Installed (or available) version string.
    pub version: String,
    /// One-line description.
    pub description: String,
    /// Target architecture (`x86_64`, `any`, ...).
    pub architecture: String,
    /// Upstream URL.
    pub url: String,
    /// License identifiers.
    pub licenses: Vec<String>,
    /// Package groups.
    pub groups: Vec<String>,
    /// Runtime dependencies.
    pub depends: Vec<String>,
    /// Optional dependencies, without their descriptions.
    pub opt_depends: Vec<String>,
    /// Packages this one conflicts with.
    pub conflicts: Vec<String>,
    /// Virtual packages this one provides.
    pub provides: Vec<String>,
    /// Packages this one replaces.
    pub replaces: Vec<String>,
    /// Installed packages that require this one.
    pub required_by: Vec<String>,
    /// Whether the package is installed locally.
    pub installed: bool,
    /// When the package was installed.
    pub install_date: Option<NaiveDateTime>,
    /// Why the package is installed.
    pub install_reason: InstallReason,
    /// Installed size in bytes.
    pub installed_size: u64,
    /// Packager (or AUR maintainer).
    pub packager: String,
    /// Build date (or AUR last-modified time).
    pub build_date: Option<NaiveDateTime>,
    /// Installed as a dependency and no longer required.
    pub is_orphan: bool,
    /// Installed but not found in any sync repository.
    pub is_foreign: bool,
    /// Known to come from the AUR.
    pub is_aur: bool,
    /// Repository name (`core`, `extra`, `aur`, `local`, ...).
    pub repository: String,
    /// An update is available.
    pub has_update: bool,
    /// Version offered by the update, when `has_update` is set.
    pub new_version: String,
    /// AUR vote count.
    pub votes: Option<u64>,
    /// AUR popularity score.
    pub popularity: Option<f64>,
}

impl Package {
    /// Number of runtime dependencies.
    #[must_use]
    pub const fn dependency_count(&self) -> usize {
        self.depends.len()
    }
}

/// Identifier of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Row ordinal.
    Index,
    /// Installed marker (remote view only).
    Installed,
    /// Repository name.
    Repository,
    /// Package name.
    Name,
    /// Version string.
    Version,
    /// Installed size.
    Size,
    /// Dependency count.
    Dependencies,
    /// Install date (local view only).
    InstallDate,
    /// Package groups.
    Groups,
    /// Description.
    Description,
}

/// Descriptor for one table column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Column {
    /// Which package attribute the column shows.
    pub kind: ColumnKind,
    /// Header text.
    pub title: &'static str,
    /// Preferred width in cells; the minimum width when `fill` is set.
    pub width: u16,
    /// Column takes the remaining horizontal space.
    pub fill: bool,
    /// Column participates in layout and navigation.
    pub visible: bool,
    /// Column can be used as a sort key.
    pub sortable: bool,
}

impl Column {
    /// What: Build a fixed-width column descriptor.
    ///
    /// Inputs:
    /// - `kind`: Column identifier
    /// - `title`: Header text
    /// - `width`: Width in terminal cells
    ///
    /// Output:
    /// - Visible, sortable, fixed-width column
    const fn fixed(kind: ColumnKind, title: &'static str, width: u16) -> Self {
        Self {
            kind,
            title,
            width,
            fill: false,
            visible: true,
            sortable: true,
        }
    }
}

/// What: Default column set in display order.
///
/// Output:
/// - Columns with the Installed column hidden (it is shown only in remote view)
///
/// Details:
/// - The Index column is always first; column navigation never selects it.
#[must_use]
pub fn default_columns() -> Vec<Column> {
    vec![
        Column {
            sortable: false,
            ..Column::fixed(ColumnKind::Index, "#", 5)
        },
        Column {
            visible: false,
            ..Column::fixed(ColumnKind::Installed, "Installed", 10)
        },
        Column::fixed(ColumnKind::Repository, "Repo", 12),
        Column::fixed(ColumnKind::Name, "Name", 30),
        Column::fixed(ColumnKind::Version, "Version", 15),
        Column::fixed(ColumnKind::Size, "Size", 15),
        Column::fixed(ColumnKind::Dependencies, "Deps", 10),
        Column::fixed(ColumnKind::InstallDate, "InstalledOn", 15),
        Column::fixed(ColumnKind::Groups, "Groups", 15),
        Column {
            fill: true,
            sortable: false,
            ..Column::fixed(ColumnKind::Description, "Description", 20)
        },
    ]
}

/// Active text filter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    /// A filter is applied.
    pub active: bool,
    /// Terms in the order they were entered; `None` matches everything.
    pub terms: Option<Vec<String>>,
}

impl FilterState {
    /// What: Filter that matches a single case-insensitive term.
    ///
    /// Inputs:
    /// - `term`: Raw term as typed
    ///
    /// Output:
    /// - Inactive filter when `term` is empty, otherwise an active one
    #[must_use]
    pub fn with_term(term: &str) -> Self {
        if term.is_empty() {
            return Self::default();
        }
        Self {
            active: true,
            terms: Some(vec![term.to_lowercase()]),
        }
    }
}

/// Display projection of one package.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    /// Index of the source package in the viewport's package arena.
    pub package: usize,
    /// Pre-formatted cell text per column.
    pub cells: HashMap<ColumnKind, String>,
    /// Hidden by the current preset or text filter.
    pub filtered: bool,
}

impl Row {
    /// Cell text for `kind`, or an empty string.
    #[must_use]
    pub fn cell(&self, kind: ColumnKind) -> &str {
        self.cells.get(&kind).map_or("", String::as_str)
    }

    /// What: Check whether the row passes a text filter.
    ///
    /// Inputs:
    /// - `filter`: Filter whose terms were lowercased on construction
    ///
    /// Output:
    /// - `true` when every term is a substring of the name or description cell
    #[must_use]
    pub fn matches(&self, filter: &FilterState) -> bool {
        let Some(terms) = filter.terms.as_ref().filter(|_| filter.active) else {
            return true;
        };
        let name = self.cell(ColumnKind::Name).to_lowercase();
        let description = self.cell(ColumnKind::Description).to_lowercase();
        terms
            .iter()
            .all(|t| name.contains(t.as_str()) || description.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, description: &str) -> Row {
        let mut cells = HashMap::new();
        cells.insert(ColumnKind::Name, name.to_string());
        cells.insert(ColumnKind::Description, description.to_string());
        Row {
            package: 0,
            cells,
            filtered: false,
        }
    }

    #[test]
    /// What: Row filter matching is case-insensitive over name and description.
    ///
    /// Inputs:
    /// - Rows with the term in the name, in the description, and nowhere
    ///
    /// Output:
    /// - Only the first two match
    fn row_matches_name_or_description() {
        let filter = FilterState::with_term("FiRe");
        assert!(row("firefox", "browser").matches(&filter));
        assert!(row("icecat", "a Firefox fork").matches(&filter));
        assert!(!row("chromium", "browser").matches(&filter));
    }

    #[test]
    /// What: An empty term produces an inactive filter that matches everything.
    fn empty_term_matches_everything() {
        let filter = FilterState::with_term("");
        assert!(!filter.active);
        assert!(filter.terms.is_none());
        assert!(row("anything", "").matches(&filter));
    }

    #[test]
    /// What: Default columns keep the index first and hide Installed.
    fn default_columns_layout() {
        let cols = default_columns();
        assert_eq!(cols.len(), 10);
        assert_eq!(cols[0].kind, ColumnKind::Index);
        assert!(!cols[0].sortable);
        assert!(!cols[1].visible);
        assert!(cols[9].fill);
        assert_eq!(InstallReason::Dependency.to_string(), "Dependency");
    }
}
