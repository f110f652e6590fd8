//! Terminal event handling: maps crossterm events to messages by focus.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::form::Control;

use super::event_loop::ResizeDebouncer;

/// Rows moved per mouse wheel notch.
const WHEEL_STEP: usize = 3;

/// Modifiers that turn a character key into a chord instead of text.
const CHORD_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL
    .union(KeyModifiers::ALT)
    .union(KeyModifiers::SUPER);

impl App {
    pub(super) fn handle_event(
        event: Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(&key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            // Bracketed paste arrives as one event, so the whole clipboard
            // is a single discrete input.
            Event::Paste(text) => model.editor_focused().then(|| Message::EditorPaste(text)),
            Event::Resize(width, height) => {
                resize_debouncer.queue(width, height, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: &KeyEvent, model: &Model) -> Option<Message> {
        // The help overlay swallows every key.
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        match key.code {
            KeyCode::F(1) => return Some(Message::ToggleHelp),
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(Message::Quit);
            }
            _ => {}
        }

        if model.editor_focused() {
            Self::handle_editor_key(key)
        } else {
            Self::handle_form_key(key, model)
        }
    }

    fn handle_editor_key(key: &KeyEvent) -> Option<Message> {
        let selecting = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::EditorSelectAll)
            }
            KeyCode::Char(ch) if !key.modifiers.intersects(CHORD_MODIFIERS) => {
                Some(Message::EditorInsert(ch))
            }
            KeyCode::Enter => Some(Message::EditorNewline),
            KeyCode::Backspace => Some(Message::EditorBackspace),
            KeyCode::Delete => Some(Message::EditorDeleteForward),
            // Tab stays in the editor as an indent, it never moves focus.
            KeyCode::Tab => Some(Message::EditorTab),
            KeyCode::Left => Some(Message::EditorMove(Direction::Left, selecting)),
            KeyCode::Right => Some(Message::EditorMove(Direction::Right, selecting)),
            KeyCode::Up => Some(Message::EditorMove(Direction::Up, selecting)),
            KeyCode::Down => Some(Message::EditorMove(Direction::Down, selecting)),
            KeyCode::Home => Some(Message::EditorHome(selecting)),
            KeyCode::End => Some(Message::EditorEnd(selecting)),
            KeyCode::Esc => Some(Message::CycleFocus),
            _ => None,
        }
    }

    fn handle_form_key(key: &KeyEvent, model: &Model) -> Option<Message> {
        let on_checkbox = model
            .focused_field()
            .and_then(|idx| model.form.fields().get(idx))
            .is_some_and(|field| matches!(field.control, Control::Checkbox { .. }));
        match key.code {
            KeyCode::Tab => Some(Message::CycleFocus),
            KeyCode::Esc => Some(Message::FocusEditor),
            KeyCode::Backspace => Some(Message::FormBackspace),
            KeyCode::Enter => Some(Message::FormToggle),
            KeyCode::Char(' ') if on_checkbox => Some(Message::FormToggle),
            KeyCode::Char(ch) if !key.modifiers.intersects(CHORD_MODIFIERS) => {
                Some(Message::FormInsert(ch))
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let page_row = Self::page_row_at(model, mouse.row)?;
                if let Some(line) = crate::ui::editor_line_at_page_row(model, page_row) {
                    let col =
                        usize::from(mouse.column.saturating_sub(crate::ui::editor_text_col(model)));
                    return Some(Message::EditorClickAt(line, col));
                }
                crate::ui::field_at_page_row(model, page_row).map(Message::FieldClick)
            }
            MouseEventKind::ScrollUp => {
                if Self::wheel_over_fixed_editor(model, mouse.row) {
                    Some(Message::EditorScrollUp(WHEEL_STEP))
                } else if model.page.can_scroll_up() {
                    Some(Message::PageScrollUp(WHEEL_STEP))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollDown => {
                if Self::wheel_over_fixed_editor(model, mouse.row) {
                    Some(Message::EditorScrollDown(WHEEL_STEP))
                } else if model.page.can_scroll_down() {
                    Some(Message::PageScrollDown(WHEEL_STEP))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// The page row under a terminal row, unless the row is in the footer.
    fn page_row_at(model: &Model, row: u16) -> Option<usize> {
        let content_rows = usize::from(model.page.height())
            .saturating_sub(usize::from(model.active_toast().is_some()));
        let row = usize::from(row);
        (row < content_rows).then(|| model.page.offset() + row)
    }

    /// Wheel events over a fixed-height editor scroll the pane itself (and
    /// with it the gutter); everywhere else they scroll the page.
    fn wheel_over_fixed_editor(model: &Model, row: u16) -> bool {
        if model.editor_hook.options().auto_fit_height {
            return false;
        }
        Self::page_row_at(model, row)
            .and_then(|page_row| crate::ui::editor_line_at_page_row(model, page_row))
            .is_some()
    }

    pub(super) fn view(model: &Model, frame: &mut Frame) {
        crate::ui::render(model, frame);
    }
}
