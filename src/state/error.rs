//! State management-specific error types.

/// Errors that can occur during state operations.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Profile not set in state
    #[error("Profile not set in state")]
    ProfileNotSet,

    /// Product not found in state
    #[error("Product not found: {id}")]
    #[allow(dead_code)]
    ProductNotFound { id: String },

    /// Rule not found in state
    #[error("Rule not found: {id}")]
    #[allow(dead_code)]
    RuleNotFound { id: String },
}
