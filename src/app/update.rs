use crate::app::{Focus, Model, ToastLevel};
use crate::editor::Direction;
use crate::signal::Inbound;

/// All possible events and actions in the application.
///
/// These represent user input, host signals, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editor editing
    /// Insert a character at the caret, replacing any selection
    EditorInsert(char),
    /// Insert a line break (Enter)
    EditorNewline,
    /// Delete selection or the character before the caret (Backspace)
    EditorBackspace,
    /// Delete selection or the character at the caret (Delete)
    EditorDeleteForward,
    /// Indent: two spaces in place of the selection (Tab)
    EditorTab,
    /// Insert pasted text as a single edit
    EditorPaste(String),

    // Editor caret and scrolling
    /// Move the caret; true extends the selection (Shift held)
    EditorMove(Direction, bool),
    /// Move the caret to the start of its line (Home)
    EditorHome(bool),
    /// Move the caret to the end of its line (End)
    EditorEnd(bool),
    /// Select the entire value (Ctrl+A)
    EditorSelectAll,
    /// Place the caret from a mouse click at (line, col)
    EditorClickAt(usize, usize),
    /// Scroll the editor pane up (fixed-height mode only)
    EditorScrollUp(usize),
    /// Scroll the editor pane down (fixed-height mode only)
    EditorScrollDown(usize),

    // Focus and form
    /// Focus the editor pane
    FocusEditor,
    /// Focus the form field at this index
    FocusField(usize),
    /// Move focus to the next element (Tab inside the form)
    CycleFocus,
    /// Append a character to the focused text field
    FormInsert(char),
    /// Delete the last character of the focused text field
    FormBackspace,
    /// Flip the focused checkbox (Space/Enter)
    FormToggle,
    /// Mouse click on a form field: focus it, flipping checkboxes
    FieldClick(usize),

    // Host
    /// A signal arrived from the host
    HostSignal(Inbound),

    // Page and window
    /// Scroll the page up by n rows
    PageScrollUp(usize),
    /// Scroll the page down by n rows
    PageScrollDown(usize),
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Signals
/// to the host are side effects and happen afterwards, in
/// [`super::App::handle_message_side_effects`].
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editor editing
        Message::EditorInsert(ch) => {
            model.editor.insert_char(ch);
            model.finish_editor_input();
        }
        Message::EditorNewline => {
            model.editor.insert_newline();
            model.finish_editor_input();
        }
        Message::EditorBackspace => {
            model.editor.backspace();
            model.finish_editor_input();
        }
        Message::EditorDeleteForward => {
            model.editor.delete_forward();
            model.finish_editor_input();
        }
        Message::EditorTab => {
            model.editor_hook.handle_tab(&mut model.editor);
            model.finish_editor_input();
        }
        Message::EditorPaste(text) => {
            model.editor.insert_str(&text);
            model.finish_editor_input();
        }

        // Editor caret and scrolling
        Message::EditorMove(dir, selecting) => {
            model.editor.move_caret(dir, selecting);
            model.finish_editor_input();
        }
        Message::EditorHome(selecting) => {
            model.editor.move_home(selecting);
            model.finish_editor_input();
        }
        Message::EditorEnd(selecting) => {
            model.editor.move_end(selecting);
            model.finish_editor_input();
        }
        Message::EditorSelectAll => {
            model.editor.select_all();
        }
        Message::EditorClickAt(line, col) => {
            model.focus = Focus::Editor;
            model.editor.move_to(line, col, false);
            model.finish_editor_input();
        }
        Message::EditorScrollUp(n) => {
            model.editor.scroll_up(n);
            model
                .editor_hook
                .sync_gutter(&model.editor, model.gutter.as_mut());
        }
        Message::EditorScrollDown(n) => {
            model.editor.scroll_down(n);
            model
                .editor_hook
                .sync_gutter(&model.editor, model.gutter.as_mut());
        }

        // Focus and form
        Message::FocusEditor => {
            model.focus = Focus::Editor;
            model.sync_page();
        }
        Message::FocusField(idx) => {
            if idx < model.form.len() {
                model.focus = Focus::Field(idx);
                model.sync_page();
            }
        }
        Message::CycleFocus => {
            model.cycle_focus();
            model.sync_page();
        }
        Message::FormInsert(ch) => {
            if let Some(idx) = model.focused_field() {
                model.form.insert_char(idx, ch);
            }
        }
        Message::FormBackspace => {
            if let Some(idx) = model.focused_field() {
                model.form.backspace(idx);
            }
        }
        Message::FormToggle => {
            if let Some(idx) = model.focused_field() {
                model.form.toggle(idx);
            }
        }
        Message::FieldClick(idx) => {
            if idx < model.form.len() {
                model.focus = Focus::Field(idx);
                model.form.toggle(idx);
                model.sync_page();
            }
        }

        // Host
        Message::HostSignal(signal) => {
            model.reset_hook.on_signal(signal, &mut model.form);
            model.show_toast(ToastLevel::Info, "Form reset by host");
        }

        // Page and window
        Message::PageScrollUp(n) => {
            model.page.scroll_up(n);
        }
        Message::PageScrollDown(n) => {
            model.page.scroll_down(n);
        }
        Message::Resize(_, height) => {
            model.page.resize(height.saturating_sub(1));
            model.sync_page();
        }

        // Application
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }

    model
}
