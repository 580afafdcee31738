//! Wire envelope shared by every PriceWatch API response.
//!
//! The backend wraps both successes and failures in the same shape, so the
//! transport layer normalizes its own failures (timeouts, unparseable
//! bodies) into the identical structure. Callers never need to distinguish
//! a network-layer failure from an API-layer one.

use serde::{Deserialize, Serialize};

/// Fixed message used when a request times out before the API answers.
pub const TIMEOUT_MESSAGE: &str = "İstek zaman aşımına uğradı. Lütfen tekrar deneyiniz.";

/// Fallback message when a failure carries no usable message of its own.
pub const FALLBACK_MESSAGE: &str = "Bir hata oluştu. Lütfen tekrar deneyiniz.";

/// Response envelope used by the PriceWatch API.
///
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub error_messages: Vec<String>,
    pub is_successful: bool,
    pub status_code: u16,
}

/// Envelope carried by error values, with the payload left untyped.
pub type ErrorEnvelope = ApiEnvelope<serde_json::Value>;

impl ApiEnvelope<serde_json::Value> {
    /// Envelope for a request that timed out before any response arrived.
    ///
    pub fn timeout() -> ErrorEnvelope {
        ApiEnvelope {
            data: None,
            error_messages: vec![TIMEOUT_MESSAGE.to_string()],
            is_successful: false,
            status_code: 408,
        }
    }

    /// Envelope built from a non-2xx response body.
    ///
    /// The body is used verbatim when it already carries the API's envelope
    /// shape. Otherwise a `message` field is extracted when present, falling
    /// back to a fixed message.
    pub fn from_failure(status: u16, body: &[u8]) -> ErrorEnvelope {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
            return envelope;
        }
        let message = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_owned)
            })
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());
        ApiEnvelope {
            data: None,
            error_messages: vec![message],
            is_successful: false,
            status_code: status,
        }
    }

    /// Envelope for a 2xx response whose body held no data payload.
    ///
    pub fn missing_data(status: u16) -> ErrorEnvelope {
        ApiEnvelope {
            data: None,
            error_messages: vec![FALLBACK_MESSAGE.to_string()],
            is_successful: false,
            status_code: status,
        }
    }
}
