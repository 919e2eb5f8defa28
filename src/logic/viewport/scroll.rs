use super::Viewport;

impl Viewport {
    /// Move the selection down one row.
    pub fn select_next(&mut self) {
        if self.selected_row + 1 < self.visible.len() {
            self.selected_row += 1;
        }
        self.ensure_visible();
    }

    /// Move the selection up one row.
    pub fn select_prev(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
        self.ensure_visible();
    }

    /// Half the window height, at least one row.
    const fn page_step(&self) -> usize {
        let half = self.height / 2;
        if half == 0 { 1 } else { half }
    }

    /// Move the selection down half a page.
    pub fn page_down(&mut self) {
        let last = self.visible.len().saturating_sub(1);
        self.selected_row = (self.selected_row + self.page_step()).min(last);
        self.ensure_visible();
    }

    /// Move the selection up half a page.
    pub fn page_up(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(self.page_step());
        self.ensure_visible();
    }

    /// Jump to the first row.
    pub const fn scroll_to_top(&mut self) {
        self.selected_row = 0;
        self.offset = 0;
    }

    /// Jump to the last row.
    pub const fn scroll_to_bottom(&mut self) {
        let total = self.visible.len();
        self.selected_row = total.saturating_sub(1);
        self.offset = total.saturating_sub(self.height);
    }

    /// What: Jump to a 0-based line and center it in the window.
    ///
    /// Inputs:
    /// - `line`: Target row; values past the end select the last row
    ///
    /// Output:
    /// - `selected_row = clamp(line, 0, total - 1)`
    /// - `offset = clamp(line - height / 2, 0, max(0, total - height))`
    pub fn scroll_to_line(&mut self, line: usize) {
        let total = self.visible.len();
        if total == 0 {
            self.selected_row = 0;
            self.offset = 0;
            return;
        }
        self.selected_row = line.min(total - 1);
        let max_offset = total.saturating_sub(self.height);
        self.offset = line.saturating_sub(self.height / 2).min(max_offset);
    }

    /// What: Scroll just enough to bring the selection into the window.
    ///
    /// Details:
    /// - Keeps `offset <= selected_row < offset + height` whenever `height > 0`.
    pub const fn ensure_visible(&mut self) {
        if self.height == 0 {
            return;
        }
        if self.selected_row < self.offset {
            self.offset = self.selected_row;
        } else if self.selected_row >= self.offset + self.height {
            self.offset = self.selected_row + 1 - self.height;
        }
    }

    /// What: Select a visible row by index, ignoring out-of-range indices.
    pub fn select_index(&mut self, index: usize) {
        if index < self.visible.len() {
            self.selected_row = index;
            self.ensure_visible();
        }
    }

    /// Resize the window, keeping the selection on screen.
    pub const fn set_height(&mut self, height: usize) {
        self.height = height;
        self.ensure_visible();
    }
}
