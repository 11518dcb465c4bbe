use serde::Serialize;

/// Viewport width at or above which the grid uses four columns.
pub const WIDE_BREAKPOINT: u32 = 1200;
/// Viewport width at or above which the grid uses three columns.
pub const MEDIUM_BREAKPOINT: u32 = 800;
pub const DEFAULT_ROWS_PER_COLUMN: usize = 7;

/// Breakpoint table turning a viewport width into a grid size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub rows_per_column: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            rows_per_column: DEFAULT_ROWS_PER_COLUMN,
        }
    }
}

impl Layout {
    pub fn columns(&self, viewport_width: u32) -> usize {
        if viewport_width >= WIDE_BREAKPOINT {
            4
        } else if viewport_width >= MEDIUM_BREAKPOINT {
            3
        } else {
            2
        }
    }

    pub fn items_per_page(&self, viewport_width: u32) -> usize {
        (self.columns(viewport_width) * self.rows_per_column).max(1)
    }
}

/// Current page of a paginated artist list. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: usize,
    items_per_page: usize,
}

impl PageState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn total_pages(&self, item_count: usize) -> usize {
        item_count.div_ceil(self.items_per_page).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self, item_count: usize) -> bool {
        self.current_page < self.total_pages(item_count)
    }

    /// Moves forward one page; returns `false` when already on the last page.
    pub fn next(&mut self, item_count: usize) -> bool {
        if !self.has_next(item_count) {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Moves back one page; returns `false` when already on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Jumps to `page`, clamped to `1..=total_pages`.
    pub fn go_to(&mut self, page: usize, item_count: usize) {
        self.current_page = page;
        self.clamp(item_count);
    }

    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Applies a new page size and pulls the current page back into range.
    pub fn resize(&mut self, items_per_page: usize, item_count: usize) {
        self.items_per_page = items_per_page.max(1);
        self.clamp(item_count);
    }

    pub fn clamp(&mut self, item_count: usize) {
        self.current_page = self.current_page.clamp(1, self.total_pages(item_count));
    }

    /// Items shown on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1)
            .saturating_mul(self.items_per_page)
            .min(items.len());
        let end = start.saturating_add(self.items_per_page).min(items.len());
        &items[start..end]
    }
}
