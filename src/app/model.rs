use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::editor::{EditorHook, EditorOptions, Gutter, TextArea};
use crate::form::{Form, ResetHook};
use crate::signal::{self, SignalPort};
use crate::ui::page::PageViewport;

/// Which element receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The code editor pane.
    Editor,
    /// The form field at this index.
    Field(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state apart from the
/// shortcut registry, which the hooks own through their guards.
#[derive(Debug)]
pub struct Model {
    /// The code editor surface
    pub editor: TextArea,
    /// Line-number sibling, absent with `--no-gutter`
    pub gutter: Option<Gutter>,
    /// Behavior attached to the editor
    pub editor_hook: EditorHook,
    /// The settings form below the editor
    pub form: Form,
    /// Binding from the host's reset signal to the form
    pub reset_hook: ResetHook,
    /// Outbound half of the host link
    pub port: SignalPort,
    /// Which element has keyboard focus
    pub focus: Focus,
    /// Scroll state of the page as a whole
    pub page: PageViewport,
    /// Path the edited code came from (and is saved to)
    pub file_path: PathBuf,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Whether the app should quit
    pub should_quit: bool,
    toast: Option<Toast>,
}

impl Model {
    /// Assemble the page: attach the editor hook and size the page
    /// viewport. `terminal_size` is `(width, height)`; the bottom row is
    /// reserved for the status bar.
    pub fn new(
        file_path: PathBuf,
        editor: TextArea,
        gutter: Option<Gutter>,
        form: Form,
        options: EditorOptions,
        port: SignalPort,
        terminal_size: (u16, u16),
    ) -> Self {
        let mut editor = editor;
        let editor_hook = EditorHook::attach(&mut editor, gutter.as_ref(), options, &port);
        let mut model = Self {
            editor,
            gutter,
            editor_hook,
            form,
            reset_hook: ResetHook,
            port,
            focus: Focus::Editor,
            page: PageViewport::new(terminal_size.1.saturating_sub(1), 0),
            file_path,
            help_visible: false,
            should_quit: false,
            toast: None,
        };
        model.sync_page();
        model
    }

    /// True when the editor pane has focus.
    #[must_use]
    pub const fn editor_focused(&self) -> bool {
        matches!(self.focus, Focus::Editor)
    }

    /// The focused form field index, if any.
    #[must_use]
    pub const fn focused_field(&self) -> Option<usize> {
        match self.focus {
            Focus::Editor => None,
            Focus::Field(idx) => Some(idx),
        }
    }

    /// Move focus to the next element: fields in order, then back to the
    /// editor. With an empty form the editor keeps focus.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Editor if self.form.is_empty() => Focus::Editor,
            Focus::Editor => Focus::Field(0),
            Focus::Field(idx) if idx + 1 < self.form.len() => Focus::Field(idx + 1),
            Focus::Field(_) => Focus::Editor,
        };
    }

    /// Run the hook's post-input pass: height fit, gutter sync, page
    /// relayout, caret kept on screen.
    pub fn finish_editor_input(&mut self) {
        self.editor_hook.refresh_layout(&mut self.editor);
        self.editor_hook
            .sync_gutter(&self.editor, self.gutter.as_mut());
        self.sync_page();
    }

    /// Recompute the page height from the current element heights and keep
    /// the focused element visible.
    pub fn sync_page(&mut self) {
        self.page.set_total_rows(crate::ui::page_rows(self));
        match self.focus {
            Focus::Editor => {
                let row = crate::ui::caret_page_row(self);
                self.page.reveal(row);
            }
            Focus::Field(idx) => {
                let row = crate::ui::field_page_row(self, idx);
                self.page.reveal(row);
            }
        }
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Default exists so the event loop can move the model through the pure
// update function with std::mem::take. The placeholder registers no
// shortcut and its port goes nowhere.
impl Default for Model {
    fn default() -> Self {
        let (port, _) = signal::channel();
        let mut editor = TextArea::new();
        let options = EditorOptions {
            auto_fit_height: true,
            save_shortcut: false,
        };
        let editor_hook = EditorHook::attach(&mut editor, None, options, &port);
        Self {
            editor,
            gutter: None,
            editor_hook,
            form: Form::default(),
            reset_hook: ResetHook,
            port,
            focus: Focus::Editor,
            page: PageViewport::new(23, 0),
            file_path: PathBuf::new(),
            help_visible: false,
            should_quit: false,
            toast: None,
        }
    }
}
