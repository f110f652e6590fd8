//! The settings form and its host-driven reset.
//!
//! Every control keeps the default it was declared with next to its
//! current state, so a reset is local: no signal leaves the client and no
//! data is fetched, the controls just snap back to their declared
//! defaults. The host triggers it with the `reset_form` signal, which
//! [`ResetHook`] translates into [`Form::reset`].

use crate::signal::Inbound;

/// One form control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    /// Single-line text input. Edits append at the end.
    Text { default: String, value: String },
    /// On/off toggle.
    Checkbox { default: bool, checked: bool },
}

/// A labelled control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub control: Control,
}

impl Field {
    /// A text field starting at its default.
    #[must_use]
    pub fn text(name: &str, default: &str) -> Self {
        Self {
            name: name.to_string(),
            control: Control::Text {
                default: default.to_string(),
                value: default.to_string(),
            },
        }
    }

    /// A checkbox starting at its default.
    #[must_use]
    pub fn checkbox(name: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            control: Control::Checkbox {
                default,
                checked: default,
            },
        }
    }

    /// True when the control differs from its default.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        match &self.control {
            Control::Text { default, value } => default != value,
            Control::Checkbox { default, checked } => default != checked,
        }
    }

    fn reset(&mut self) {
        match &mut self.control {
            Control::Text { default, value } => value.clone_from(default),
            Control::Checkbox { default, checked } => *checked = *default,
        }
    }
}

/// A form: an ordered list of labelled controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when any control differs from its default.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(Field::is_dirty)
    }

    /// Append `ch` to the text field at `idx`. No-op on checkboxes and
    /// out-of-range indices.
    pub fn insert_char(&mut self, idx: usize, ch: char) {
        if let Some(Field {
            control: Control::Text { value, .. },
            ..
        }) = self.fields.get_mut(idx)
        {
            value.push(ch);
        }
    }

    /// Delete the last char of the text field at `idx`. No-op on
    /// checkboxes, empty fields and out-of-range indices.
    pub fn backspace(&mut self, idx: usize) {
        if let Some(Field {
            control: Control::Text { value, .. },
            ..
        }) = self.fields.get_mut(idx)
        {
            value.pop();
        }
    }

    /// Flip the checkbox at `idx`. No-op on text fields and out-of-range
    /// indices.
    pub fn toggle(&mut self, idx: usize) {
        if let Some(Field {
            control: Control::Checkbox { checked, .. },
            ..
        }) = self.fields.get_mut(idx)
        {
            *checked = !*checked;
        }
    }

    /// Restore every control to its declared default.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.reset();
        }
    }
}

/// Binds the host's `reset_form` signal to [`Form::reset`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ResetHook;

impl ResetHook {
    /// Apply an inbound signal to the form. Payloads are ignored; the
    /// signal name alone decides.
    pub fn on_signal(self, signal: Inbound, form: &mut Form) {
        match signal {
            Inbound::ResetForm => {
                tracing::debug!(signal = signal.name(), "form reset by host");
                form.reset();
            }
        }
    }
}
