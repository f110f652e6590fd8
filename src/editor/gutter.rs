//! Line-number gutter sibling of the text surface.
//!
//! The gutter scrolls independently of the editor. It only ever tracks the
//! editor because the hook copies the editor's scroll offset over after
//! each scroll, so without a hook (or without a gutter present at attach
//! time) the two offsets drift apart. That mirror-only coupling is the
//! whole element.

/// Line-number column with its own scroll offset.
#[derive(Debug, Clone, Default)]
pub struct Gutter {
    scroll_top: usize,
}

impl Gutter {
    /// Create a gutter scrolled to the top.
    #[must_use]
    pub const fn new() -> Self {
        Self { scroll_top: 0 }
    }

    /// First visible line number row.
    #[must_use]
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Move the gutter to `line`. Called by the hook with the editor's
    /// offset; never clamped against the editor, the gutter does not know
    /// the editor's geometry.
    pub fn set_scroll_top(&mut self, line: usize) {
        self.scroll_top = line;
    }

    /// Columns needed for the numbers of a buffer with `line_count` lines,
    /// including one space of padding on each side.
    #[must_use]
    pub fn width_for(line_count: usize) -> u16 {
        let digits = if line_count < 10 {
            1
        } else {
            line_count.ilog10() as usize + 1
        };
        (digits + 2) as u16
    }
}
