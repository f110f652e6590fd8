//! Page-level scrolling.
//!
//! The editor pane grows with its content, so the page as a whole (header,
//! editor block, form, status) can get taller than the terminal. The
//! [`PageViewport`] scrolls that outer page; it never scrolls inside the
//! editor, which does its own scrolling only in fixed-height mode.

use std::ops::Range;

/// The visible slice of the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageViewport {
    height: u16,
    offset: usize,
    total_rows: usize,
}

impl PageViewport {
    /// A viewport of `height` terminal rows over a page of `total_rows`.
    #[must_use]
    pub const fn new(height: u16, total_rows: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_rows,
        }
    }

    /// First visible page row.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Viewport height in rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Full page height in rows.
    #[must_use]
    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// The range of visible page rows, clamped to the page.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_rows);
        self.offset..end
    }

    #[must_use]
    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    #[must_use]
    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    /// Scroll the least amount that brings page row `row` into view.
    pub fn reveal(&mut self, row: usize) {
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + self.height as usize {
            self.offset = (row + 1).saturating_sub(self.height as usize);
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the page height after a relayout, keeping the offset valid.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Apply a new terminal height, keeping the offset valid.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height as usize)
    }
}
