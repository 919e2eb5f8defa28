//! Named package predicates selectable with Tab or `:p <name>`.

use crate::state::types::{InstallReason, Package};

/// Identifier of a preset, as typed on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresetKind {
    /// User-installed packages.
    Explicit,
    /// Auto-installed dependencies.
    Dependency,
    /// Dependencies with no dependents.
    Orphans,
    /// Non-repo, non-AUR packages.
    Foreign,
    /// AUR packages.
    Aur,
    /// Packages with available updates.
    Updatable,
    /// Everything.
    All,
}

impl PresetKind {
    /// Every preset, in cycling order.
    pub const ALL: [Self; 7] = [
        Self::Explicit,
        Self::Dependency,
        Self::Orphans,
        Self::Foreign,
        Self::Aur,
        Self::Updatable,
        Self::All,
    ];

    /// Command-line name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Dependency => "dependency",
            Self::Orphans => "orphans",
            Self::Foreign => "foreign",
            Self::Aur => "aur",
            Self::Updatable => "updatable",
            Self::All => "all",
        }
    }

    /// Parse a command-line name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// What: Evaluate the preset predicate.
    ///
    /// Inputs:
    /// - `pkg`: Package to test
    ///
    /// Output:
    /// - `true` when the package belongs to the preset
    #[must_use]
    pub fn matches(self, pkg: &Package) -> bool {
        match self {
            Self::Explicit => pkg.install_reason == InstallReason::Explicit,
            Self::Dependency => pkg.install_reason == InstallReason::Dependency,
            Self::Orphans => pkg.is_orphan,
            Self::Foreign => pkg.is_foreign && !pkg.is_aur,
            Self::Aur => pkg.is_aur,
            Self::Updatable => pkg.has_update,
            Self::All => true,
        }
    }
}

/// A preset with its display text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preset {
    /// Identifier.
    pub kind: PresetKind,
    /// Label shown in the status bar.
    pub name: &'static str,
    /// Short explanation.
    pub description: &'static str,
}

/// What: Build the fixed preset table.
///
/// Output:
/// - Presets in cycling order, `Explicit` first
#[must_use]
pub fn default_presets() -> Vec<Preset> {
    PresetKind::ALL
        .into_iter()
        .map(|kind| {
            let (name, description) = match kind {
                PresetKind::Explicit => ("Explicit", "User-installed packages"),
                PresetKind::Dependency => ("Dependencies", "Auto-installed dependencies"),
                PresetKind::Orphans => ("Orphans", "Dependencies with no dependents"),
                PresetKind::Foreign => ("Foreign", "Non-repo, non-AUR packages"),
                PresetKind::Aur => ("AUR", "AUR packages"),
                PresetKind::Updatable => ("Updatable", "Packages with available updates"),
                PresetKind::All => ("All", "All installed packages"),
            };
            Preset {
                kind,
                name,
                description,
            }
        })
        .collect()
}

/// Comma-separated list of valid preset names, for usage messages.
#[must_use]
pub fn preset_names() -> String {
    PresetKind::ALL
        .iter()
        .map(|p| p.key())
        .collect::<Vec<_>>()
        .join(", ")
}
