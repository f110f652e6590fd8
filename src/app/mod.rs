//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Signals to the host are side effects and stay out of [`update`]: after
//! every state transition the loop asks the editor hook whether the content
//! changed and pushes the resulting signal through the outbound port.
//! Inbound host signals enter the loop as ordinary messages.

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

use std::path::PathBuf;

pub use model::{Focus, Model, ToastLevel};
pub use update::{Message, update};

use crate::editor::EditorOptions;
use crate::form::Form;

/// Pane height in rows when the content fit is off and no row count was
/// given.
const DEFAULT_FIXED_ROWS: usize = 10;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    file_path: PathBuf,
    gutter_enabled: bool,
    options: EditorOptions,
    rows: usize,
    form: Form,
}

impl App {
    /// Create a new application editing the given file.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            gutter_enabled: true,
            options: EditorOptions::default(),
            rows: DEFAULT_FIXED_ROWS,
            form: Form::default(),
        }
    }

    /// Show or hide the line-number gutter.
    #[must_use]
    pub const fn with_gutter(mut self, enabled: bool) -> Self {
        self.gutter_enabled = enabled;
        self
    }

    /// Configure how the editor hook attaches to the pane.
    #[must_use]
    pub const fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    /// Pane height in rows for fixed-height mode. Ignored while the height
    /// follows the content.
    #[must_use]
    pub const fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// The settings form rendered below the editor.
    #[must_use]
    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }
}

#[cfg(test)]
mod tests;
