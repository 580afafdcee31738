//! Per-field validation rules and their evaluation.
//!
//! A [`Rule`] is an explicit record of optional constraints rather than a
//! bag of dynamic keys, so a form declares exactly which checks apply to a
//! field. Evaluation is pure and cheap enough to run on every keystroke.

use log::*;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

/// Message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Message for a value that fails the email shape check.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Message for a value that fails the rule's custom pattern.
pub const PATTERN_MESSAGE: &str = "Invalid format";

/// RFC-light email shape: something, an @, something, a dot segment.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Custom check returning `Some(message)` on failure.
pub type CustomCheck = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Declarative constraints for a single form field.
///
#[derive(Clone, Default)]
pub struct Rule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub email: bool,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomCheck>,
}

impl Rule {
    /// Return a rule with no constraints.
    ///
    pub fn new() -> Rule {
        Rule::default()
    }

    /// Require a non-empty, non-whitespace value.
    pub fn required(mut self) -> Rule {
        self.required = true;
        self
    }

    /// Require at least `n` characters (inclusive).
    pub fn min_length(mut self, n: usize) -> Rule {
        self.min_length = Some(n);
        self
    }

    /// Allow at most `n` characters (inclusive).
    pub fn max_length(mut self, n: usize) -> Rule {
        self.max_length = Some(n);
        self
    }

    /// Require an email-shaped value.
    pub fn email(mut self) -> Rule {
        self.email = true;
        self
    }

    /// Require the value to match `pattern`.
    pub fn pattern(mut self, pattern: Regex) -> Rule {
        self.pattern = Some(pattern);
        self
    }

    /// Attach a custom check, run only after every built-in check passed.
    pub fn custom<F>(mut self, check: F) -> Rule
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("email", &self.email)
            .field("pattern", &self.pattern.as_ref().map(|p| p.as_str()))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Evaluate one field value against a rule, returning at most one error
/// message. Checks run in a fixed order (required, min_length, max_length,
/// email, pattern, custom) and stop at the first failure.
///
/// An empty value fails only the required check; optional fields are
/// validated only when non-empty.
pub fn evaluate(value: &str, rule: &Rule) -> Option<String> {
    if value.trim().is_empty() {
        if rule.required {
            return Some(REQUIRED_MESSAGE.to_string());
        }
        return None;
    }

    let length = value.chars().count();
    if let Some(min) = rule.min_length {
        if length < min {
            return Some(format!("Must be at least {} characters", min));
        }
    }
    if let Some(max) = rule.max_length {
        if length > max {
            return Some(format!("Must be at most {} characters", max));
        }
    }

    if rule.email {
        match Regex::new(EMAIL_PATTERN) {
            Ok(re) => {
                if !re.is_match(value) {
                    return Some(EMAIL_MESSAGE.to_string());
                }
            }
            Err(e) => warn!("Failed to compile email pattern: {}", e),
        }
    }

    if let Some(ref pattern) = rule.pattern {
        if !pattern.is_match(value) {
            return Some(PATTERN_MESSAGE.to_string());
        }
    }

    if let Some(ref check) = rule.custom {
        if let Some(message) = check(value) {
            return Some(message);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn test_required_fails_on_empty_and_whitespace() {
        let rule = Rule::new().required();
        assert_eq!(evaluate("", &rule).as_deref(), Some(REQUIRED_MESSAGE));
        assert_eq!(evaluate("   ", &rule).as_deref(), Some(REQUIRED_MESSAGE));
        assert!(evaluate("x", &rule).is_none());
    }

    #[test]
    fn test_required_short_circuits_before_custom() {
        static CUSTOM_CALLED: AtomicBool = AtomicBool::new(false);
        let rule = Rule::new().required().custom(|_| {
            CUSTOM_CALLED.store(true, Ordering::SeqCst);
            Some("custom failure".to_string())
        });
        assert_eq!(evaluate("  ", &rule).as_deref(), Some(REQUIRED_MESSAGE));
        assert!(!CUSTOM_CALLED.load(Ordering::SeqCst));
    }

    #[test]
    fn test_optional_empty_skips_all_checks() {
        let rule = Rule::new()
            .min_length(5)
            .email()
            .custom(|_| Some("never".to_string()));
        assert!(evaluate("", &rule).is_none());
        assert!(evaluate("   ", &rule).is_none());
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let rule = Rule::new().min_length(3).max_length(5);
        assert!(evaluate("abc", &rule).is_none());
        assert!(evaluate("abcde", &rule).is_none());
        assert_eq!(
            evaluate("ab", &rule).as_deref(),
            Some("Must be at least 3 characters")
        );
        assert_eq!(
            evaluate("abcdef", &rule).as_deref(),
            Some("Must be at most 5 characters")
        );
    }

    #[test]
    fn test_min_length_reported_before_max() {
        let rule = Rule::new().min_length(3).max_length(2);
        assert_eq!(
            evaluate("ab", &rule).as_deref(),
            Some("Must be at least 3 characters")
        );
    }

    #[test]
    fn test_email_requires_dot_segment() {
        let rule = Rule::new().required().email();
        assert_eq!(evaluate("a@b", &rule).as_deref(), Some(EMAIL_MESSAGE));
        assert_eq!(evaluate("a b@c.com", &rule).as_deref(), Some(EMAIL_MESSAGE));
        assert!(evaluate("a@b.com", &rule).is_none());
    }

    #[test]
    fn test_pattern_mismatch_yields_generic_message() {
        let rule = Rule::new().pattern(Regex::new(r"^\d+$").unwrap());
        assert_eq!(evaluate("12a", &rule).as_deref(), Some(PATTERN_MESSAGE));
        assert!(evaluate("123", &rule).is_none());
    }

    #[test]
    fn test_custom_runs_last() {
        let rule = Rule::new()
            .min_length(3)
            .custom(|v| (!v.starts_with("ok")).then(|| "must start with ok".to_string()));
        // min_length wins first
        assert_eq!(
            evaluate("no", &rule).as_deref(),
            Some("Must be at least 3 characters")
        );
        // then custom is consulted
        assert_eq!(
            evaluate("nope", &rule).as_deref(),
            Some("must start with ok")
        );
        assert!(evaluate("okay", &rule).is_none());
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let rule = Rule::new().required().min_length(2).email();
        for _ in 0..3 {
            assert_eq!(evaluate("a@b", &rule).as_deref(), Some(EMAIL_MESSAGE));
        }
    }
}
