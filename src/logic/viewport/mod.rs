//! List viewport: row collection, selection, scroll window, sort, and filter.
//!
//! The viewport owns the package arena for the rows it shows. Rows refer to
//! packages by arena index. `visible` holds indices into `all_rows` and is
//! always a subsequence of it: the sorted rows that pass both the active
//! preset and the active text filter.

mod columns;
mod filter;
mod scroll;
mod sort;

pub use sort::compare_rows;

use crate::logic::presets::PresetKind;
use crate::logic::rows::packages_to_rows;
use crate::state::types::{Column, ColumnKind, FilterState, Package, Row, default_columns};

/// Scrollable, sortable, filterable package table state.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Package arena; rows index into it.
    packages: Vec<Package>,
    /// Every row, in current sort order.
    all_rows: Vec<Row>,
    /// Indices into `all_rows` that pass the preset and filter.
    visible: Vec<usize>,
    /// Column descriptors in display order.
    pub columns: Vec<Column>,
    /// First visible row of the render window.
    pub offset: usize,
    /// Number of rows in the render window.
    pub height: usize,
    /// Selected index into the visible rows.
    pub selected_row: usize,
    /// Selected column index.
    pub selected_col: usize,
    /// Active sort key.
    pub sort_column: ColumnKind,
    /// Sort descending.
    pub sort_reverse: bool,
    /// Active text filter.
    pub filter: FilterState,
    /// Active preset predicate.
    preset: Option<PresetKind>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(default_columns())
    }
}

impl Viewport {
    /// What: Create an empty viewport.
    ///
    /// Inputs:
    /// - `columns`: Column descriptors in display order
    ///
    /// Output:
    /// - Viewport sorted by name ascending with the Name column selected
    #[must_use]
    pub fn new(columns: Vec<Column>) -> Self {
        let selected_col = columns
            .iter()
            .position(|c| c.kind == ColumnKind::Name)
            .unwrap_or_else(|| usize::from(columns.len() > 1));
        Self {
            packages: Vec::new(),
            all_rows: Vec::new(),
            visible: Vec::new(),
            columns,
            offset: 0,
            height: 0,
            selected_row: 0,
            selected_col,
            sort_column: ColumnKind::Name,
            sort_reverse: false,
            filter: FilterState::default(),
            preset: None,
        }
    }

    /// What: Replace the package arena and every row.
    ///
    /// Inputs:
    /// - `packages`: New package list (arena order is load order)
    ///
    /// Output:
    /// - Rows are rebuilt, sorted by the current sort key, and all shown
    ///
    /// Details:
    /// - Preset and text filter are dropped; callers re-apply them.
    /// - The selection is kept, only clamped into range.
    pub fn set_rows(&mut self, packages: Vec<Package>) {
        self.all_rows = packages_to_rows(&packages);
        self.packages = packages;
        self.filter = FilterState::default();
        self.preset = None;
        self.sort_rows();
        self.clamp_selection();
    }

    /// Package arena in load order.
    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Every row in sort order.
    #[must_use]
    pub fn all_rows(&self) -> &[Row] {
        &self.all_rows
    }

    /// Rows that pass the preset and filter, in sort order.
    pub fn visible_rows(&self) -> impl Iterator<Item = &Row> {
        self.visible.iter().filter_map(|&i| self.all_rows.get(i))
    }

    /// Number of visible rows.
    #[must_use]
    pub const fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Visible row at `index`.
    #[must_use]
    pub fn visible_row(&self, index: usize) -> Option<&Row> {
        self.visible.get(index).and_then(|&i| self.all_rows.get(i))
    }

    /// Package backing `row`.
    #[must_use]
    pub fn package_of(&self, row: &Row) -> Option<&Package> {
        self.packages.get(row.package)
    }

    /// Package under the selection, if any row is visible.
    #[must_use]
    pub fn selected_package(&self) -> Option<&Package> {
        self.visible_row(self.selected_row)
            .and_then(|row| self.package_of(row))
    }

    /// Active preset predicate.
    #[must_use]
    pub const fn preset(&self) -> Option<PresetKind> {
        self.preset
    }

    /// What: Rows inside the render window.
    ///
    /// Output:
    /// - `[offset, offset + height)` of the visible rows, empty when `offset`
    ///   is past the end, every visible row when `height` is zero
    #[must_use]
    pub fn get_visible_rows(&self) -> Vec<&Row> {
        let len = self.visible.len();
        if self.height == 0 {
            return self.visible_rows().collect();
        }
        if self.offset >= len {
            return Vec::new();
        }
        let end = (self.offset + self.height).min(len);
        self.visible[self.offset..end]
            .iter()
            .filter_map(|&i| self.all_rows.get(i))
            .collect()
    }

    /// Rebuild `visible` from `all_rows` under the current preset and filter.
    fn recompute_visible(&mut self) {
        let preset = self.preset;
        let mut visible = Vec::with_capacity(self.all_rows.len());
        for (i, row) in self.all_rows.iter_mut().enumerate() {
            let by_preset = preset.is_none_or(|p| {
                self.packages
                    .get(row.package)
                    .is_some_and(|pkg| p.matches(pkg))
            });
            let keep = by_preset && row.matches(&self.filter);
            row.filtered = !keep;
            if keep {
                visible.push(i);
            }
        }
        self.visible = visible;
    }

    /// Keep the selection inside the visible rows.
    pub fn clamp_selection(&mut self) {
        let len = self.visible.len();
        if len == 0 {
            self.selected_row = 0;
            self.offset = 0;
            return;
        }
        if self.selected_row >= len {
            self.selected_row = len - 1;
        }
        self.ensure_visible();
    }
}
