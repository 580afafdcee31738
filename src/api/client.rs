//! HTTP client for PriceWatch API requests.
//!
//! This module provides a low-level HTTP client wrapper for making requests
//! to the PriceWatch API, handling bearer authentication, failure
//! normalization, and response parsing. Authorization failures purge the
//! session store and are published as [`AuthEvent`]s rather than handled
//! in-place.

use super::envelope::{ApiEnvelope, ErrorEnvelope};
use super::error::ApiError;
use crate::session::{AuthEvent, SessionStore};
use log::*;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::sync::broadcast;

/// Makes requests to PriceWatch and tries to conform response data to the
/// API's envelope shape.
///
pub struct Client {
    base_url: String,
    session: SessionStore,
    auth_events: broadcast::Sender<AuthEvent>,
    http_client: reqwest::Client,
}

impl Client {
    /// Returns a new instance for the given base URL and session store.
    ///
    /// # Panics
    /// Panics if the HTTP client cannot be created. This should never happen
    /// in practice as reqwest::Client::builder().build() only fails on
    /// invalid configuration, which we don't use.
    pub fn new(base_url: &str, session: SessionStore, timeout: Duration) -> Self {
        let (auth_events, _) = broadcast::channel(16);
        Client {
            base_url: base_url.trim_end_matches('/').to_owned(),
            session,
            auth_events,
            http_client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client - this should never happen"),
        }
    }

    /// Return the session store this client reads its credential from.
    ///
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Subscribe to session-level events published by this client.
    ///
    pub fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.auth_events.subscribe()
    }

    /// Make request and return the envelope's data payload or an error.
    ///
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: Option<Vec<(&str, &str)>>,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let (status, bytes) = self.dispatch(method, path, params, body).await?;
        let envelope: ApiEnvelope<T> = serde_json::from_slice(&bytes)?;
        if !envelope.is_successful {
            return Err(ApiError::Api(ErrorEnvelope {
                data: None,
                error_messages: envelope.error_messages,
                is_successful: false,
                status_code: envelope.status_code,
            }));
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Api(ErrorEnvelope::missing_data(status.as_u16())))
    }

    /// Make request and discard the response body. Used for deletions, where
    /// the API answers with an empty or data-less envelope.
    ///
    pub(crate) async fn call_no_content(
        &self,
        method: Method,
        path: &str,
    ) -> Result<(), ApiError> {
        self.dispatch(method, path, None, None).await?;
        Ok(())
    }

    /// Send the request and normalize every failure mode into the API's
    /// envelope shape before handing bytes back for deserialization.
    ///
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        params: Option<Vec<(&str, &str)>>,
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, Vec<u8>), ApiError> {
        let request_url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("Requesting {} {}...", method, request_url);

        let mut request = self.http_client.request(method, &request_url);

        // Attach the bearer credential when a session is active
        if let Some(token) = self.session.token() {
            request = request.header("Authorization", format!("Bearer {}", token));
        }
        if let Some(params) = params {
            request = request.query(&params);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!("Request to {} timed out.", request_url);
                return Err(ApiError::Api(ErrorEnvelope::timeout()));
            }
            Err(e) => {
                // No response at all; the caller still sees the failure
                error!("Request to {} failed without a response: {}", request_url, e);
                return Err(ApiError::Http(e));
            }
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("Received 401 from {}; purging stored credential.", request_url);
            self.session.purge();
            // Nobody listening is fine; the session is already purged
            let _ = self.auth_events.send(AuthEvent::SessionExpired);
        }

        let bytes = response.bytes().await?.to_vec();

        if !status.is_success() {
            return Err(ApiError::Api(ErrorEnvelope::from_failure(
                status.as_u16(),
                &bytes,
            )));
        }

        Ok((status, bytes))
    }
}
