//! The editable text surface.
//!
//! A [`TextArea`] owns the text as a rope plus the element state a host
//! page can observe: selection, scroll offset, pane height and a revision
//! counter that advances on every content mutation. Offsets are flat char
//! indices into the text; `0..=len_chars()` are all valid caret positions.

use ropey::Rope;

/// Caret movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Editable multi-line text element.
#[derive(Debug, Clone)]
pub struct TextArea {
    rope: Rope,
    /// Fixed end of the selection, in chars.
    anchor: usize,
    /// Moving end of the selection, in chars. Equal to `anchor` when the
    /// selection is empty.
    caret: usize,
    /// Preferred column for vertical movement through short lines.
    col_memory: Option<usize>,
    /// First visible line.
    scroll_top: usize,
    /// Visible rows, at least 1.
    height: usize,
    /// Bumps on every content mutation, never on caret or scroll moves.
    revision: u64,
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new()
    }
}

impl TextArea {
    /// Create an empty area one row high.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            anchor: 0,
            caret: 0,
            col_memory: None,
            scroll_top: 0,
            height: 1,
            revision: 0,
        }
    }

    /// Create an area holding `text`, caret at the start.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut area = Self::new();
        area.rope = Rope::from_str(text);
        area
    }

    // --- Content ---

    /// The full text.
    #[must_use]
    pub fn value(&self) -> String {
        self.rope.to_string()
    }

    /// Replace the full text, clamping selection and scroll into the new
    /// bounds. Counts as a content mutation.
    pub fn set_value(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        let len = self.rope.len_chars();
        self.anchor = self.anchor.min(len);
        self.caret = self.caret.min(len);
        self.col_memory = None;
        self.clamp_scroll();
        self.revision += 1;
    }

    /// Text length in chars.
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the area holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Content mutation counter.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    // --- Selection ---

    /// Caret position in chars.
    #[must_use]
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// Selection as an ordered `(start, end)` char range. Start equals end
    /// when the selection is empty.
    #[must_use]
    pub const fn selection(&self) -> (usize, usize) {
        if self.anchor <= self.caret {
            (self.anchor, self.caret)
        } else {
            (self.caret, self.anchor)
        }
    }

    /// True when at least one char is selected.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.anchor != self.caret
    }

    /// The selected text, empty when the selection is.
    #[must_use]
    pub fn selected_text(&self) -> String {
        let (start, end) = self.selection();
        self.rope.slice(start..end).to_string()
    }

    /// Place the selection, clamping both ends into bounds.
    pub fn set_selection(&mut self, anchor: usize, caret: usize) {
        let len = self.rope.len_chars();
        self.anchor = anchor.min(len);
        self.caret = caret.min(len);
        self.col_memory = None;
    }

    /// Select the full text.
    pub fn select_all(&mut self) {
        self.anchor = 0;
        self.caret = self.rope.len_chars();
        self.col_memory = None;
    }

    fn place(&mut self, pos: usize) {
        self.caret = pos;
        self.anchor = pos;
        self.col_memory = None;
    }

    // --- Editing ---

    /// Replace the selection with `text` and place the caret after it.
    ///
    /// With an empty selection this is a plain insert at the caret. The
    /// revision advances once per call that actually changes content.
    pub fn insert_str(&mut self, text: &str) {
        let (start, end) = self.selection();
        if start == end && text.is_empty() {
            return;
        }
        if start != end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        self.place(start + text.chars().count());
        self.revision += 1;
    }

    /// Insert one char, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Insert a line break, replacing any selection.
    pub fn insert_newline(&mut self) {
        self.insert_str("\n");
    }

    /// Delete the selection, or the char before the caret when the
    /// selection is empty. No-op at the start of the text.
    pub fn backspace(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.rope.remove(start..end);
            self.place(start);
            self.revision += 1;
        } else if start > 0 {
            self.rope.remove(start - 1..start);
            self.place(start - 1);
            self.revision += 1;
        }
    }

    /// Delete the selection, or the char after the caret when the
    /// selection is empty. No-op at the end of the text.
    pub fn delete_forward(&mut self) {
        let (start, end) = self.selection();
        if start != end {
            self.rope.remove(start..end);
            self.place(start);
            self.revision += 1;
        } else if start < self.rope.len_chars() {
            self.rope.remove(start..start + 1);
            self.place(start);
            self.revision += 1;
        }
    }

    // --- Caret movement ---

    /// Move the caret one step in `dir`.
    pub fn move_caret(&mut self, dir: Direction, selecting: bool) {
        match dir {
            Direction::Left => self.move_left(selecting),
            Direction::Right => self.move_right(selecting),
            Direction::Up => self.move_up(selecting),
            Direction::Down => self.move_down(selecting),
        }
    }

    /// Move the caret one char left. Without `selecting`, a non-empty
    /// selection collapses to its start instead.
    pub fn move_left(&mut self, selecting: bool) {
        if !selecting && self.has_selection() {
            let (start, _) = self.selection();
            self.place(start);
            return;
        }
        self.caret = self.caret.saturating_sub(1);
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = None;
    }

    /// Move the caret one char right. Without `selecting`, a non-empty
    /// selection collapses to its end instead.
    pub fn move_right(&mut self, selecting: bool) {
        if !selecting && self.has_selection() {
            let (_, end) = self.selection();
            self.place(end);
            return;
        }
        self.caret = (self.caret + 1).min(self.rope.len_chars());
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = None;
    }

    /// Move the caret one line up, keeping the preferred column across
    /// short lines.
    pub fn move_up(&mut self, selecting: bool) {
        let (line, col) = self.caret_line_col();
        let target_col = self.col_memory.unwrap_or(col);
        let target_line = line.saturating_sub(1);
        self.move_vertical(target_line, target_col, selecting);
    }

    /// Move the caret one line down, keeping the preferred column across
    /// short lines.
    pub fn move_down(&mut self, selecting: bool) {
        let (line, col) = self.caret_line_col();
        let target_col = self.col_memory.unwrap_or(col);
        let target_line = (line + 1).min(self.line_count().saturating_sub(1));
        self.move_vertical(target_line, target_col, selecting);
    }

    fn move_vertical(&mut self, line: usize, col: usize, selecting: bool) {
        self.caret = self.line_col_to_char(line, col);
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = Some(col);
    }

    /// Move the caret to the start of its line.
    pub fn move_home(&mut self, selecting: bool) {
        let (line, _) = self.caret_line_col();
        self.caret = self.rope.line_to_char(line);
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = None;
    }

    /// Move the caret to the end of its line, before the line break.
    pub fn move_end(&mut self, selecting: bool) {
        let (line, _) = self.caret_line_col();
        self.caret = self.rope.line_to_char(line) + self.line_trimmed_len(line);
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = None;
    }

    /// Move the caret to `(line, col)`, clamping both into bounds.
    pub fn move_to(&mut self, line: usize, col: usize, selecting: bool) {
        let line = line.min(self.line_count().saturating_sub(1));
        self.caret = self.line_col_to_char(line, col);
        if !selecting {
            self.anchor = self.caret;
        }
        self.col_memory = None;
    }

    // --- Geometry ---

    /// Number of content lines. A trailing line break counts an extra,
    /// empty line the caret can sit on.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Rows needed to show the full content.
    #[must_use]
    pub fn content_height(&self) -> usize {
        self.line_count()
    }

    /// Text of line `idx` without its line break. Empty for out-of-range
    /// lines.
    #[must_use]
    pub fn line_text(&self, idx: usize) -> String {
        if idx >= self.rope.len_lines() {
            return String::new();
        }
        let start = self.rope.line_to_char(idx);
        self.rope
            .slice(start..start + self.line_trimmed_len(idx))
            .to_string()
    }

    /// Caret position as `(line, col)` in chars.
    #[must_use]
    pub fn caret_line_col(&self) -> (usize, usize) {
        let line = self.rope.char_to_line(self.caret);
        (line, self.caret - self.rope.line_to_char(line))
    }

    /// Char index of `(line, col)`, clamped into the line.
    #[must_use]
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.rope.len_lines().saturating_sub(1));
        self.rope.line_to_char(line) + col.min(self.line_trimmed_len(line))
    }

    /// Chars in `line` excluding its line break.
    fn line_trimmed_len(&self, line: usize) -> usize {
        let slice = self.rope.line(line);
        let mut len = slice.len_chars();
        while len > 0 {
            let ch = slice.char(len - 1);
            if ch == '\n' || ch == '\r' {
                len -= 1;
            } else {
                break;
            }
        }
        len
    }

    // --- Height and scrolling ---

    /// Visible rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Set the visible rows, at least 1, and re-clamp the scroll offset.
    pub fn set_height(&mut self, rows: usize) {
        self.height = rows.max(1);
        self.clamp_scroll();
    }

    /// Grow or shrink the pane to exactly fit the content, scrolled to the
    /// top. This is the auto-fit applied on attach and after every edit.
    pub fn fit_height(&mut self) {
        self.height = self.content_height().max(1);
        self.scroll_top = 0;
    }

    /// First visible line.
    #[must_use]
    pub const fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Scroll so `line` is the first visible one, clamped to the content.
    pub fn set_scroll_top(&mut self, line: usize) {
        self.scroll_top = line.min(self.max_scroll());
    }

    /// Scroll up by n lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.scroll_top = self.scroll_top.saturating_sub(n);
    }

    /// Scroll down by n lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.set_scroll_top(self.scroll_top + n);
    }

    /// Scroll the least amount that brings the caret line into view.
    pub fn ensure_caret_visible(&mut self) {
        let (line, _) = self.caret_line_col();
        if line < self.scroll_top {
            self.scroll_top = line;
        } else if line >= self.scroll_top + self.height {
            self.scroll_top = line + 1 - self.height;
        }
    }

    fn max_scroll(&self) -> usize {
        self.content_height().saturating_sub(self.height)
    }

    fn clamp_scroll(&mut self) {
        self.scroll_top = self.scroll_top.min(self.max_scroll());
    }
}
