//! Behavior attached to the text surface.
//!
//! An [`EditorHook`] gives a plain [`TextArea`] its page behavior: height
//! that follows the content, a change signal to the host after every edit,
//! Tab as two-space indent, a gutter that mirrors the editor's scroll and
//! a process-wide save chord. The hook never repaints or schedules
//! anything itself; the event loop drives it through three small calls
//! per cycle (layout, gutter sync, change pickup).

use crate::editor::area::TextArea;
use crate::editor::gutter::Gutter;
use crate::shortcut::{self, KeyCombo, ShortcutGuard};
use crate::signal::{Outbound, SignalPort};

/// Spaces inserted for one Tab press.
pub const TAB_INSERT: &str = "  ";

/// Per-placement knobs. Both default to on; a host wanting a fixed-height
/// pane or no global save chord turns one off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorOptions {
    /// Grow and shrink the pane to always fit the content.
    pub auto_fit_height: bool,
    /// Register Ctrl+S / Cmd+S process-wide while the hook is attached.
    pub save_shortcut: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            auto_fit_height: true,
            save_shortcut: true,
        }
    }
}

/// Live editor behavior; created by [`EditorHook::attach`].
#[derive(Debug)]
pub struct EditorHook {
    options: EditorOptions,
    /// Whether a gutter sibling existed at attach time. A gutter appearing
    /// later is never picked up.
    has_gutter: bool,
    /// Last revision a change signal was emitted for.
    last_revision: u64,
    /// Keeps the save chord registered for the hook's lifetime.
    _save_guard: Option<ShortcutGuard>,
}

impl EditorHook {
    /// Attach to `area`, fitting its height and registering the save chord
    /// per `options`. Content already present does not produce a change
    /// signal; only edits after this point do.
    pub fn attach(
        area: &mut TextArea,
        gutter: Option<&Gutter>,
        options: EditorOptions,
        port: &SignalPort,
    ) -> Self {
        if options.auto_fit_height {
            area.fit_height();
        }
        let save_guard = options.save_shortcut.then(|| {
            let port = port.clone();
            shortcut::register(KeyCombo::ctrl_or_cmd('s'), move || {
                port.push(Outbound::SaveChanges);
            })
        });
        tracing::debug!(
            auto_fit = options.auto_fit_height,
            save_chord = options.save_shortcut,
            gutter = gutter.is_some(),
            "editor hook attached"
        );
        Self {
            options,
            has_gutter: gutter.is_some(),
            last_revision: area.revision(),
            _save_guard: save_guard,
        }
    }

    /// Tab keypress: replace the selection with two spaces, caret after
    /// them, then run the same layout pass any other edit gets. The edit
    /// flows through the normal change pickup, so one Tab yields exactly
    /// one change signal.
    pub fn handle_tab(&self, area: &mut TextArea) {
        area.insert_str(TAB_INSERT);
        self.refresh_layout(area);
    }

    /// Re-fit the pane after an edit or caret move: full-content height in
    /// auto-fit mode, otherwise scroll the caret into view.
    pub fn refresh_layout(&self, area: &mut TextArea) {
        if self.options.auto_fit_height {
            area.fit_height();
        } else {
            area.ensure_caret_visible();
        }
    }

    /// Copy the editor's scroll offset onto the gutter, if one was present
    /// at attach time.
    pub fn sync_gutter(&self, area: &TextArea, gutter: Option<&mut Gutter>) {
        if !self.has_gutter {
            return;
        }
        if let Some(gutter) = gutter {
            gutter.set_scroll_top(area.scroll_top());
        }
    }

    /// The change signal for any content mutation since the last call, or
    /// `None` when the value is unchanged. Carries the full value.
    pub fn take_change(&mut self, area: &TextArea) -> Option<Outbound> {
        if area.revision() == self.last_revision {
            return None;
        }
        self.last_revision = area.revision();
        Some(Outbound::CodeChange {
            value: area.value(),
        })
    }

    /// The options this hook was attached with.
    #[must_use]
    pub const fn options(&self) -> EditorOptions {
        self.options
    }

    /// Whether the save chord is registered.
    #[must_use]
    pub const fn save_shortcut_active(&self) -> bool {
        self._save_guard.is_some()
    }
}
