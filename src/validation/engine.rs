//! Form-level validation coordination.
//!
//! A [`FormValidator`] holds the rule set for one form plus the state the
//! rules alone cannot derive: which errors are stored, which fields the
//! user has touched, and whether a submit was attempted. The field values
//! themselves stay with the caller.

use super::rules::{evaluate, Rule};
use crate::state::FormState;
use std::collections::{HashMap, HashSet};

/// Declarative per-form validation configuration.
pub type RuleSet = HashMap<String, Rule>;

/// Tracks validation results and visibility state for one form.
///
/// "Is invalid" and "should show invalid" are deliberately separate:
/// `is_valid` recomputes from current values regardless of interaction,
/// while `display_errors` only exposes errors for fields the user touched
/// or after a submit attempt, so a freshly rendered form never flashes
/// errors.
#[derive(Debug, Default)]
pub struct FormValidator {
    rules: RuleSet,
    errors: HashMap<String, String>,
    touched: HashSet<String>,
    attempted_submit: bool,
}

impl FormValidator {
    /// Return a new instance for the given rule set.
    ///
    pub fn new(rules: RuleSet) -> FormValidator {
        FormValidator {
            rules,
            errors: HashMap::new(),
            touched: HashSet::new(),
            attempted_submit: false,
        }
    }

    /// Evaluate a single field without storing the result.
    ///
    /// Fields without a rule are always valid.
    pub fn validate_field(&self, name: &str, value: &str) -> Option<String> {
        self.rules.get(name).and_then(|rule| evaluate(value, rule))
    }

    /// Evaluate every ruled field against the current form values,
    /// atomically replacing the stored errors. Returns overall validity.
    ///
    /// Used right before submit.
    pub fn validate_form(&mut self, form: &FormState) -> bool {
        let mut errors = HashMap::new();
        for (name, rule) in &self.rules {
            if let Some(message) = evaluate(form.value(name), rule) {
                errors.insert(name.clone(), message);
            }
        }
        let valid = errors.is_empty();
        self.errors = errors;
        valid
    }

    /// Evaluate one field and store its error immediately. Returns whether
    /// the field is currently valid.
    ///
    /// Used on blur.
    pub fn validate_field_and_store(&mut self, name: &str, value: &str) -> bool {
        match self.validate_field(name, value) {
            Some(message) => {
                self.errors.insert(name.to_owned(), message);
                false
            }
            None => {
                self.errors.remove(name);
                true
            }
        }
    }

    /// Mark a field as touched. Idempotent.
    ///
    pub fn touch_field(&mut self, name: &str) {
        self.touched.insert(name.to_owned());
    }

    /// Whether a field has been touched in this form lifecycle.
    ///
    pub fn is_touched(&self, name: &str) -> bool {
        self.touched.contains(name)
    }

    /// Record a submit attempt: sets the global flag and touches every
    /// ruled field, making all latent errors visible at once.
    ///
    pub fn mark_submit_attempted(&mut self) {
        self.attempted_submit = true;
        let names: Vec<String> = self.rules.keys().cloned().collect();
        for name in names {
            self.touched.insert(name);
        }
    }

    /// Whether a submit has been attempted since the last reset.
    ///
    pub fn attempted_submit(&self) -> bool {
        self.attempted_submit
    }

    /// Clear errors, touched state, and the submit-attempted flag.
    ///
    /// Used after a successful submit or an explicit form reset.
    pub fn reset(&mut self) {
        self.errors.clear();
        self.touched.clear();
        self.attempted_submit = false;
    }

    /// Overall validity, recomputed from current values. Independent of
    /// touched state: a form can be invalid before any interaction.
    ///
    pub fn is_valid(&self, form: &FormState) -> bool {
        self.rules
            .iter()
            .all(|(name, rule)| evaluate(form.value(name), rule).is_none())
    }

    /// The subset of stored errors the UI may render: only fields that are
    /// touched or, after a submit attempt, all of them.
    ///
    pub fn display_errors(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .filter(|(name, _)| self.attempted_submit || self.touched.contains(name.as_str()))
            .map(|(name, message)| (name.clone(), message.clone()))
            .collect()
    }
}
