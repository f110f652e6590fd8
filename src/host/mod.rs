//! The in-process embedding host.
//!
//! Stands in for the remote side of the signal link. It remembers the
//! latest `handle_code_change` value, writes it to the edited file when
//! `save_changes` arrives and answers a successful save with `reset_form`.
//! Failures stay on this side of the link; the client only ever hears
//! `reset_form`.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::signal::{Inbound, Outbound};

/// Spawn the host thread.
///
/// The thread runs until every sender of `outbound` is gone, so shutdown
/// is simply dropping the client's ports.
pub fn spawn(
    path: PathBuf,
    outbound: Receiver<Outbound>,
    inbound: Sender<Inbound>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut latest: Option<String> = None;
        while let Ok(signal) = outbound.recv() {
            tracing::debug!(signal = signal.name(), "host received");
            match signal {
                Outbound::CodeChange { value } => {
                    latest = Some(value);
                }
                Outbound::SaveChanges => {
                    let Some(value) = latest.as_deref() else {
                        tracing::debug!("save with no changes yet, nothing to write");
                        continue;
                    };
                    match std::fs::write(&path, value) {
                        Ok(()) => {
                            tracing::info!(
                                path = %path.display(),
                                bytes = value.len(),
                                "saved"
                            );
                            // The client is indifferent to this send failing
                            // too; it would mean the client is already gone.
                            let _ = inbound.send(Inbound::ResetForm);
                        }
                        Err(err) => {
                            tracing::warn!(path = %path.display(), %err, "save failed");
                        }
                    }
                }
            }
        }
        tracing::debug!("outbound channel closed, host exiting");
    })
}
