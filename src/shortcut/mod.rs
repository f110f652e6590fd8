//! Process-wide keyboard shortcuts.
//!
//! Shortcuts registered here fire no matter which element has focus; the
//! input layer consults [`dispatch`] before any focus-based routing, the
//! way a document-level key listener runs before element handlers. A
//! registration lives exactly as long as the [`ShortcutGuard`] it returns,
//! so a hook that holds the guard detaches its shortcut simply by being
//! dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex, PoisonError};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

static REGISTRY: LazyLock<Mutex<Vec<Entry>>> = LazyLock::new(|| Mutex::new(Vec::new()));

struct Entry {
    id: u64,
    combo: KeyCombo,
    handler: Box<dyn FnMut() + Send>,
}

/// A key chord a shortcut listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    ch: char,
    modifiers: KeyModifiers,
}

impl KeyCombo {
    /// A chord of `ch` with a specific modifier set.
    #[must_use]
    pub const fn new(ch: char, modifiers: KeyModifiers) -> Self {
        Self { ch, modifiers }
    }

    /// `ch` with either Ctrl or the platform command key held.
    #[must_use]
    pub const fn ctrl_or_cmd(ch: char) -> Self {
        Self {
            ch,
            modifiers: KeyModifiers::CONTROL.union(KeyModifiers::SUPER),
        }
    }

    /// True when `event` presses this chord. Modifier matching is by
    /// intersection, so `ctrl_or_cmd` accepts either key.
    #[must_use]
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == KeyCode::Char(self.ch) && event.modifiers.intersects(self.modifiers)
    }
}

/// Keeps a shortcut registered; dropping it deregisters.
#[derive(Debug)]
pub struct ShortcutGuard {
    id: u64,
}

impl Drop for ShortcutGuard {
    fn drop(&mut self) {
        let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        registry.retain(|entry| entry.id != self.id);
    }
}

/// Register `handler` to run whenever `combo` is pressed, anywhere.
pub fn register(combo: KeyCombo, handler: impl FnMut() + Send + 'static) -> ShortcutGuard {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    registry.push(Entry {
        id,
        combo,
        handler: Box::new(handler),
    });
    ShortcutGuard { id }
}

/// Run every handler whose chord matches `event`. Returns true when at
/// least one ran, in which case the event is consumed.
///
/// The registry lock is held while handlers run; handlers must not
/// register or dispatch shortcuts themselves.
pub fn dispatch(event: &KeyEvent) -> bool {
    let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
    let mut handled = false;
    for entry in registry.iter_mut() {
        if entry.combo.matches(event) {
            (entry.handler)();
            handled = true;
        }
    }
    handled
}

/// Serializes tests that register or dispatch the same chord; the registry
/// is process-wide and the test harness runs in parallel.
#[cfg(test)]
pub(crate) fn registry_test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GATE: Mutex<()> = Mutex::new(());
    GATE.lock().unwrap_or_else(PoisonError::into_inner)
}
