use super::Viewport;
use crate::logic::presets::PresetKind;
use crate::state::types::FilterState;

impl Viewport {
    /// What: Filter visible rows by a text term.
    ///
    /// Inputs:
    /// - `term`: Case-insensitive substring matched against name and
    ///   description; empty clears the filter
    ///
    /// Output:
    /// - Visible rows recomputed from scratch, selection and scroll reset to top
    pub fn apply_filter(&mut self, term: &str) {
        self.filter = FilterState::with_term(term);
        self.recompute_visible();
        self.selected_row = 0;
        self.offset = 0;
    }

    /// Drop the text filter, keeping any preset.
    pub fn clear_filter(&mut self) {
        self.apply_filter("");
    }

    /// What: Restrict visible rows to a preset.
    ///
    /// Inputs:
    /// - `preset`: Predicate, or `None` to show every row
    ///
    /// Output:
    /// - Selection reset to top, rows re-sorted under the current key
    pub fn apply_preset_filter(&mut self, preset: Option<PresetKind>) {
        self.preset = preset;
        self.recompute_visible();
        self.selected_row = 0;
        self.offset = 0;
        self.sort_rows();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::{ColumnKind, InstallReason, Package};
    use crate::test_utils::named_packages;

    fn names(vp: &Viewport) -> Vec<String> {
        vp.visible_rows()
            .map(|r| r.cell(ColumnKind::Name).to_string())
            .collect()
    }

    #[test]
    /// What: "fire" matches firefox and fireball regardless of query case.
    fn filter_fire_matches_two() {
        let mut vp = Viewport::default();
        vp.set_rows(named_packages(&["firefox", "fireball", "chromium"]));
        for q in ["fire", "FIRE", "FiRe"] {
            vp.apply_filter(q);
            assert_eq!(names(&vp), ["fireball", "firefox"], "query {q}");
            assert!(vp.filter.active);
        }
    }

    #[test]
    /// What: Clearing a filter restores the full sorted row list.
    fn clear_filter_restores_all_rows() {
        let mut vp = Viewport::default();
        vp.height = 2;
        vp.set_rows(named_packages(&["firefox", "fireball", "chromium", "alpine"]));
        vp.select_next();
        vp.apply_filter("fire");
        assert_eq!(vp.selected_row, 0);
        vp.clear_filter();
        let all: Vec<_> = vp
            .all_rows()
            .iter()
            .map(|r| r.cell(ColumnKind::Name).to_string())
            .collect();
        assert_eq!(names(&vp), all);
        assert!(!vp.filter.active);
    }

    #[test]
    /// What: Text filter narrows within the preset and clearing keeps the preset.
    fn filter_composes_with_preset() {
        let mut pkgs = named_packages(&["fireball", "firefox", "fish", "chromium"]);
        pkgs[0].install_reason = InstallReason::Explicit;
        pkgs[2].install_reason = InstallReason::Explicit;
        let mut vp = Viewport::default();
        vp.set_rows(pkgs);
        vp.apply_preset_filter(Some(PresetKind::Explicit));
        assert_eq!(names(&vp), ["fireball", "fish"]);
        vp.apply_filter("fire");
        assert_eq!(names(&vp), ["fireball"]);
        vp.clear_filter();
        assert_eq!(names(&vp), ["fireball", "fish"]);
        vp.apply_preset_filter(None);
        assert_eq!(vp.visible_len(), 4);
    }

    #[test]
    /// What: Sorting under a preset keeps the preset subset.
    fn sort_keeps_preset() {
        let mut pkgs: Vec<Package> = named_packages(&["a", "b", "c"]);
        pkgs[1].is_orphan = true;
        pkgs[2].is_orphan = true;
        let mut vp = Viewport::default();
        vp.set_rows(pkgs);
        vp.apply_preset_filter(Some(PresetKind::Orphans));
        vp.apply_sort(ColumnKind::Name, true);
        assert_eq!(names(&vp), ["c", "b"]);
    }
}
