//! Terminal UI: page geometry and rendering.
//!
//! The page is laid out in virtual rows (editor block, spacer, form
//! block) that can exceed the terminal height; [`page`] scrolls them. The
//! geometry functions here map between page rows and the elements on
//! them, for both rendering and mouse hit-testing. The bottom terminal
//! row always holds the status bar and is not part of the page.

pub mod page;

mod render;

pub use render::render;

use crate::app::Model;
use crate::editor::Gutter;

/// Blank rows between the editor block and the form block.
pub const BLOCK_SPACING: usize = 1;

/// Page row of the first editor text row (row 0 is the block border).
pub const EDITOR_TEXT_TOP: usize = 1;

/// Rows of the editor block: its text rows plus two border rows.
#[must_use]
pub fn editor_block_rows(model: &Model) -> usize {
    model.editor.height() + 2
}

/// Total page height in rows.
#[must_use]
pub fn page_rows(model: &Model) -> usize {
    let mut rows = editor_block_rows(model);
    if !model.form.is_empty() {
        rows += BLOCK_SPACING + model.form.len() + 2;
    }
    rows
}

/// Page row holding the caret.
#[must_use]
pub fn caret_page_row(model: &Model) -> usize {
    let (line, _) = model.editor.caret_line_col();
    EDITOR_TEXT_TOP + line.saturating_sub(model.editor.scroll_top())
}

/// Page row of form field `idx`.
#[must_use]
pub fn field_page_row(model: &Model, idx: usize) -> usize {
    editor_block_rows(model) + BLOCK_SPACING + 1 + idx
}

/// Width of the gutter column inside the editor block, or a single
/// padding column when no gutter exists.
#[must_use]
pub fn gutter_width(model: &Model) -> u16 {
    model
        .gutter
        .as_ref()
        .map_or(1, |_| Gutter::width_for(model.editor.line_count()))
}

/// Column of the first editor text cell (after border and gutter).
#[must_use]
pub fn editor_text_col(model: &Model) -> u16 {
    1 + gutter_width(model)
}

/// The editor line shown on `page_row`, if that row is inside the editor
/// pane. Rows below the content (fixed-height panes taller than the
/// text) map to the last line.
#[must_use]
pub fn editor_line_at_page_row(model: &Model, page_row: usize) -> Option<usize> {
    let rows = EDITOR_TEXT_TOP..EDITOR_TEXT_TOP + model.editor.height();
    if !rows.contains(&page_row) {
        return None;
    }
    let line = model.editor.scroll_top() + (page_row - EDITOR_TEXT_TOP);
    Some(line.min(model.editor.line_count().saturating_sub(1)))
}

/// The form field on `page_row`, if that row is inside the form block.
#[must_use]
pub fn field_at_page_row(model: &Model, page_row: usize) -> Option<usize> {
    if model.form.is_empty() {
        return None;
    }
    let first = field_page_row(model, 0);
    if page_row < first {
        return None;
    }
    let idx = page_row - first;
    (idx < model.form.len()).then_some(idx)
}
