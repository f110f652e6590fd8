//! Terminal lifecycle and the message pump.

use std::io::stdout;
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::editor::{Gutter, TextArea};
use crate::signal::{self, Inbound};

/// Debounces resize events so rapid terminal resizing doesn't relayout on
/// every intermediate size.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Queue a resize, replacing any pending one.
    pub(super) fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    /// Take the queued size if the quiet period has passed.
    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_ms) = self.pending?;
        if now_ms.saturating_sub(queued_ms) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the application until the user quits.
    ///
    /// Reads the file, spawns the host thread, takes over the terminal and
    /// pumps events through [`update`]. The terminal is restored before this
    /// returns, even on error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if the terminal cannot
    /// be initialized, or if a terminal read/draw fails mid-session.
    pub fn run(&mut self) -> Result<()> {
        let text = std::fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;

        let mut editor = TextArea::from_text(&text);
        if !self.options.auto_fit_height {
            editor.set_height(self.rows);
        }
        let gutter = self.gutter_enabled.then(Gutter::new);

        let (port, outbound_rx) = signal::channel();
        let (inbound_tx, inbound_rx) = mpsc::channel();
        let host = crate::host::spawn(self.file_path.clone(), outbound_rx, inbound_tx);

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; relayed needs an interactive terminal")?;
        let size = terminal.size()?;
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;

        let mut model = Model::new(
            self.file_path.clone(),
            editor,
            gutter,
            std::mem::take(&mut self.form),
            self.options,
            port,
            (size.width, size.height),
        );

        let result = Self::event_loop(&mut terminal, &mut model, &inbound_rx);

        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        // Dropping the model releases the save chord and with it the last
        // outbound sender, which is what stops the host thread.
        drop(model);
        if host.join().is_err() {
            tracing::warn!("host thread panicked");
        }

        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        inbound: &Receiver<Inbound>,
    ) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            // Host signals become ordinary messages.
            while let Ok(signal) = inbound.try_recv() {
                *model = update(std::mem::take(model), Message::HostSignal(signal));
                needs_render = true;
            }

            // Poll fast while work is pending, otherwise idle.
            let poll_ms = if needs_render {
                0
            } else if resize_debouncer.is_pending() {
                10
            } else {
                250
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                needs_render |= Self::step(event::read()?, model, event_ms, &mut resize_debouncer);

                // Drain event bursts (key repeat, paste, mouse drags) before
                // rendering so we paint once per burst.
                while event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    needs_render |=
                        Self::step(event::read()?, model, drain_ms, &mut resize_debouncer);
                }
            }

            if needs_render {
                terminal.draw(|frame| Self::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Feed one terminal event through the registered shortcuts and then the
    /// focus-based key map. Returns whether a repaint is due.
    pub(super) fn step(
        event: event::Event,
        model: &mut Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> bool {
        // Registered chords run before any focus dispatch and consume the
        // event; the focused element never sees the key.
        if let event::Event::Key(key) = &event
            && crate::shortcut::dispatch(key)
        {
            return true;
        }
        let Some(msg) = Self::handle_event(event, model, now_ms, resize_debouncer) else {
            return false;
        };
        *model = update(std::mem::take(model), msg);
        Self::handle_message_side_effects(model);
        true
    }
}
