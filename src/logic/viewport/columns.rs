use super::Viewport;
use crate::state::types::ColumnKind;

impl Viewport {
    /// What: Move the column cursor right, wrapping.
    ///
    /// Details:
    /// - Stays within `[1, len - 1]` and skips hidden columns.
    pub fn next_column(&mut self) {
        self.step_column(true);
    }

    /// Move the column cursor left, wrapping.
    pub fn prev_column(&mut self) {
        self.step_column(false);
    }

    /// Shared stepping for column navigation.
    fn step_column(&mut self, forward: bool) {
        let len = self.columns.len();
        if len < 2 {
            return;
        }
        let mut col = self.selected_col.clamp(1, len - 1);
        for _ in 0..len {
            col = if forward {
                if col + 1 >= len { 1 } else { col + 1 }
            } else if col <= 1 {
                len - 1
            } else {
                col - 1
            };
            if self.columns[col].visible {
                self.selected_col = col;
                return;
            }
        }
    }

    /// What: Show or hide a column.
    ///
    /// Details:
    /// - When the selected column is hidden, the cursor moves to the next visible one.
    pub fn set_column_visible(&mut self, kind: ColumnKind, visible: bool) {
        for col in &mut self.columns {
            if col.kind == kind {
                col.visible = visible;
            }
        }
        let selected_hidden = self
            .columns
            .get(self.selected_col)
            .is_some_and(|c| !c.visible);
        if selected_hidden {
            self.next_column();
        }
    }

    /// Kind of the selected column.
    #[must_use]
    pub fn selected_column_kind(&self) -> Option<ColumnKind> {
        self.columns.get(self.selected_col).map(|c| c.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Column navigation wraps and never lands on the index or hidden columns.
    fn column_navigation_skips_index_and_hidden() {
        let mut vp = Viewport::default();
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Name));
        for _ in 0..6 {
            vp.next_column();
        }
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Description));
        vp.next_column();
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Repository));
        vp.prev_column();
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Description));

        vp.set_column_visible(ColumnKind::Installed, true);
        vp.next_column();
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Installed));
        vp.set_column_visible(ColumnKind::Installed, false);
        assert_eq!(vp.selected_column_kind(), Some(ColumnKind::Repository));
    }
}
