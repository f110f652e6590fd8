//! Side effects that run after each state transition.

use crate::app::{App, Model};

impl App {
    /// Push whatever signal the last transition produced.
    ///
    /// The editor hook's revision gate decides whether anything goes out,
    /// so this runs after every message; a caret move or a focus change
    /// simply produces nothing.
    pub(super) fn handle_message_side_effects(model: &mut Model) {
        if let Some(signal) = model.editor_hook.take_change(&model.editor) {
            model.port.push(signal);
        }
    }
}
