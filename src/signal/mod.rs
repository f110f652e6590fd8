//! Named signals exchanged with the embedding host.
//!
//! The host lives behind a pair of mpsc channels, so signals are typed
//! enums in-process, but every signal also knows its wire name and JSON
//! payload. Logs and tests therefore see the exact frames a remote host
//! would: `handle_code_change { value }`, `save_changes {}` and
//! `reset_form`.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};

use serde::Serialize;
use serde_json::json;

/// Wire name for editor content changes.
pub const CODE_CHANGE: &str = "handle_code_change";
/// Wire name for save requests.
pub const SAVE_CHANGES: &str = "save_changes";
/// Wire name for the host-initiated form reset.
pub const RESET_FORM: &str = "reset_form";

/// Client → host signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// The editor value changed. Carries the full new value, never a diff.
    CodeChange {
        /// Complete text of the editor surface after the change.
        value: String,
    },
    /// The user requested a save (Ctrl+S / Cmd+S anywhere on the page).
    SaveChanges,
}

impl Outbound {
    /// The signal's wire name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CodeChange { .. } => CODE_CHANGE,
            Self::SaveChanges => SAVE_CHANGES,
        }
    }

    /// The signal as it would cross the host boundary.
    pub fn frame(&self) -> Frame {
        let payload = match self {
            Self::CodeChange { value } => json!({ "value": value }),
            Self::SaveChanges => json!({}),
        };
        Frame {
            event: self.name(),
            payload,
        }
    }
}

/// Host → client signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// Restore the bound form's fields to their markup defaults.
    /// Any payload the host attaches is ignored.
    ResetForm,
}

impl Inbound {
    /// The signal's wire name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ResetForm => RESET_FORM,
        }
    }

    /// The signal as it would cross the host boundary.
    pub fn frame(self) -> Frame {
        Frame {
            event: self.name(),
            payload: json!({}),
        }
    }
}

/// A signal in wire shape: event name plus JSON payload object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Wire name, e.g. `handle_code_change`.
    pub event: &'static str,
    /// Payload object; `{}` when the signal carries nothing.
    pub payload: serde_json::Value,
}

/// Counters for pushes, grouped by signal kind.
#[derive(Debug, Default)]
struct PortCounters {
    changes: AtomicU64,
    saves: AtomicU64,
}

/// Outbound half of the host channel.
///
/// Cheap to clone so detached handlers (the document-level save shortcut)
/// can capture one. Pushes are counted for the status bar and logged;
/// channel failures are swallowed, since the host side of the link is not
/// this client's problem.
#[derive(Debug, Clone)]
pub struct SignalPort {
    tx: Sender<Outbound>,
    counters: Arc<PortCounters>,
}

impl SignalPort {
    /// Push a signal to the host.
    pub fn push(&self, signal: Outbound) {
        match &signal {
            Outbound::CodeChange { .. } => {
                self.counters.changes.fetch_add(1, Ordering::Relaxed);
            }
            Outbound::SaveChanges => {
                self.counters.saves.fetch_add(1, Ordering::Relaxed);
            }
        }
        let frame = signal.frame();
        tracing::debug!(signal = frame.event, payload = %frame.payload, "push to host");
        // A closed channel means the host is gone; nothing to surface here.
        let _ = self.tx.send(signal);
    }

    /// Number of `handle_code_change` pushes so far.
    pub fn pushed_changes(&self) -> u64 {
        self.counters.changes.load(Ordering::Relaxed)
    }

    /// Number of `save_changes` pushes so far.
    pub fn pushed_saves(&self) -> u64 {
        self.counters.saves.load(Ordering::Relaxed)
    }
}

/// Create the outbound half of the host link.
pub fn channel() -> (SignalPort, Receiver<Outbound>) {
    let (tx, rx) = mpsc::channel();
    let port = SignalPort {
        tx,
        counters: Arc::new(PortCounters::default()),
    };
    (port, rx)
}
