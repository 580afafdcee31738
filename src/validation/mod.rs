//! Declarative form validation.
//!
//! This module contains the validation core shared by every dashboard form:
//! - Per-field rule evaluation (`rules`): pure, short-circuiting checks
//! - Form-level coordination (`engine`): stored errors, touched state, and
//!   the touched-or-submitted filter that decides what the UI may show

mod engine;
mod rules;

pub use engine::{FormValidator, RuleSet};
pub use rules::{evaluate, CustomCheck, Rule};
pub use rules::{EMAIL_MESSAGE, PATTERN_MESSAGE, REQUIRED_MESSAGE};
