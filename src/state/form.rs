//! Form value state.
//!
//! Field values live with the application state, not with the validator:
//! the validation engine borrows a [`FormState`] whenever it needs to
//! recompute, and the UI writes into it on every keystroke.

use std::collections::HashMap;

/// Field-name to current-value mapping for one form.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormState {
    values: HashMap<String, String>,
}

impl FormState {
    /// Return a new empty instance.
    ///
    pub fn new() -> FormState {
        FormState::default()
    }

    /// Set a field's current value.
    ///
    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_owned(), value.to_owned());
    }

    /// Return a field's current value, or the empty string if never set.
    ///
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    /// Discard all field values.
    ///
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_field_reads_empty() {
        let form = FormState::new();
        assert_eq!(form.value("email"), "");
    }

    #[test]
    fn test_set_and_overwrite() {
        let mut form = FormState::new();
        form.set("email", "a@b.com");
        assert_eq!(form.value("email"), "a@b.com");
        form.set("email", "c@d.com");
        assert_eq!(form.value("email"), "c@d.com");
    }

    #[test]
    fn test_clear() {
        let mut form = FormState::new();
        form.set("email", "a@b.com");
        form.clear();
        assert_eq!(form.value("email"), "");
    }
}
