//! PriceWatch API-specific error types.

use super::envelope::{ErrorEnvelope, FALLBACK_MESSAGE};

/// Errors that can occur during PriceWatch API operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed without producing a response
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error envelope (including normalized timeouts)
    #[error("API error (status {}): {}", .0.status_code, .0.error_messages.join(", "))]
    Api(ErrorEnvelope),

    /// Failed to deserialize API response
    #[error("Failed to deserialize API response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// Generic API error
    #[error("PriceWatch API error: {0}")]
    Other(String),
}

impl ApiError {
    /// Return the envelope carried by this error, if any.
    ///
    pub fn envelope(&self) -> Option<&ErrorEnvelope> {
        match self {
            ApiError::Api(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Return a human-readable message suitable for inline display.
    ///
    /// Uses the first message from the error envelope when present,
    /// otherwise a fixed fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api(envelope) => envelope
                .error_messages
                .first()
                .cloned()
                .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
            _ => FALLBACK_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::envelope::TIMEOUT_MESSAGE;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::Other("Test error".to_string());
        assert!(error.to_string().contains("PriceWatch API error"));
        assert!(error.to_string().contains("Test error"));

        let error = ApiError::Api(ErrorEnvelope::timeout());
        let error_str = error.to_string();
        assert!(error_str.contains("408"));
        assert!(error_str.contains(TIMEOUT_MESSAGE));
    }

    #[test]
    fn test_user_message_prefers_envelope() {
        let error = ApiError::Api(ErrorEnvelope::from_failure(
            400,
            br#"{"message": "Gecersiz istek"}"#,
        ));
        assert_eq!(error.user_message(), "Gecersiz istek");
    }

    #[test]
    fn test_user_message_fallback() {
        let error = ApiError::Other("internal".to_string());
        assert_eq!(error.user_message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_envelope_accessor() {
        let error = ApiError::Api(ErrorEnvelope::timeout());
        assert_eq!(error.envelope().unwrap().status_code, 408);
        let error = ApiError::Other("x".to_string());
        assert!(error.envelope().is_none());
    }
}
