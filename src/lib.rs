// Dependency version skew between transitive deps is outside our control.
#![allow(clippy::multiple_crate_versions)]

//! # Relayed
//!
//! A terminal code editor pane that relays edits to an embedding host.
//!
//! Relayed binds client-side behavior to a plain textarea surface:
//! - Pane height that follows the content
//! - A line-number gutter kept in lockstep with the pane's scroll
//! - Tab as a two-space indent instead of focus traversal
//! - A `handle_code_change` signal after every discrete edit
//! - A document-level Ctrl+S / Cmd+S chord that fires `save_changes`
//! - A settings form the host can snap back with `reset_form`
//!
//! ## Architecture
//!
//! Relayed uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! Signals cross the host boundary as named events with JSON payloads;
//! in-process they are typed enums over a pair of mpsc channels.
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: The text surface, its gutter and the editor hook
//! - [`form`]: The settings form and its reset hook
//! - [`signal`]: Typed host signals and the outbound port
//! - [`shortcut`]: Process-wide keyboard chords
//! - [`host`]: The in-process demo host
//! - [`ui`]: Terminal rendering and page geometry
//! - [`config`]: Flag-file configuration

pub mod app;
pub mod config;
pub mod editor;
pub mod form;
pub mod host;
pub mod shortcut;
pub mod signal;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model, update};
    pub use crate::editor::{EditorHook, EditorOptions, Gutter, TextArea};
    pub use crate::form::{Field, Form};
    pub use crate::signal::{Inbound, Outbound, SignalPort};
}
