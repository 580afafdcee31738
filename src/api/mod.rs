//! PriceWatch API surface.
//!
//! Responsible for asynchronous interaction with the PriceWatch API,
//! including transformation of response envelopes into explicitly-defined
//! types. Built on the session-aware [`client::Client`], so every call
//! carries the bearer credential and shares the same failure normalization.

mod client;
mod envelope;
mod error;
mod request;
mod resource;

pub use envelope::{ApiEnvelope, ErrorEnvelope, FALLBACK_MESSAGE, TIMEOUT_MESSAGE};
pub use error::ApiError;
pub use request::RequestTracker;
pub use resource::*;

use crate::config::Config;
use crate::session::{AuthEvent, SessionStore};
use crate::utils::phone;
use chrono::prelude::*;
use client::Client;
use log::*;
use reqwest::Method;
use serde_json::json;
use std::time::Duration;
use tokio::sync::broadcast;

/// Transactions older than this are not shown on the dashboard.
const TRANSACTION_WINDOW_DAYS: i64 = 90;

/// High-level facade over the PriceWatch REST API.
///
pub struct PriceWatch {
    client: Client,
}

impl PriceWatch {
    /// Returns a new instance for the given configuration and session store.
    ///
    pub fn new(config: &Config, session: SessionStore) -> PriceWatch {
        debug!(
            "Initializing PriceWatch client for base URL {}...",
            config.api_base_url
        );
        PriceWatch {
            client: Client::new(
                &config.api_base_url,
                session,
                Duration::from_secs(config.request_timeout_secs),
            ),
        }
    }

    /// Subscribe to session-level events (credential purged on 401).
    ///
    pub fn subscribe_auth(&self) -> broadcast::Receiver<AuthEvent> {
        self.client.subscribe_auth()
    }

    /// Sign in with credentials, storing the returned bearer token in both
    /// session storage locations. Returns the account profile.
    ///
    pub async fn login(&self, email: &str, password: &str) -> Result<Profile, ApiError> {
        debug!("Signing in {}...", email);
        let auth: AuthSession = self
            .client
            .call(
                Method::POST,
                "auth/login",
                None,
                Some(json!({ "email": email, "password": password })),
            )
            .await?;
        if let Err(e) = self.client.session().set_token(&auth.token) {
            // The in-memory half is set; persistence failure only costs the
            // session its restart survival
            error!("Failed to persist session token: {}", e);
        }
        Ok(auth.profile)
    }

    /// End the session locally by purging the stored credential.
    ///
    pub fn logout(&self) {
        debug!("Signing out; purging stored credential...");
        self.client.session().purge();
    }

    /// Returns the authenticated account profile.
    ///
    pub async fn me(&self) -> Result<Profile, ApiError> {
        debug!("Requesting authenticated profile...");
        self.client.call(Method::GET, "users/me", None, None).await
    }

    /// Update the account profile. The phone number is reduced to its
    /// canonical API representation before sending.
    ///
    pub async fn update_profile(&self, name: &str, raw_phone: &str) -> Result<Profile, ApiError> {
        debug!("Updating profile...");
        self.client
            .call(
                Method::PUT,
                "users/me",
                None,
                Some(json!({ "name": name, "phone": phone::clean_for_api(raw_phone) })),
            )
            .await
    }

    /// Returns the tracked products.
    ///
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        debug!("Requesting tracked products...");
        self.client.call(Method::GET, "products", None, None).await
    }

    /// Start tracking a product by URL.
    ///
    pub async fn track_product(&self, url: &str, name: &str) -> Result<Product, ApiError> {
        debug!("Tracking product {}...", url);
        self.client
            .call(
                Method::POST,
                "products",
                None,
                Some(json!({ "url": url, "name": name })),
            )
            .await
    }

    /// Stop tracking a product.
    ///
    pub async fn remove_product(&self, id: &str) -> Result<(), ApiError> {
        debug!("Removing product {}...", id);
        self.client
            .call_no_content(Method::DELETE, &format!("products/{}", id))
            .await
    }

    /// Returns the configured price alert rules.
    ///
    pub async fn rules(&self) -> Result<Vec<PriceRule>, ApiError> {
        debug!("Requesting price rules...");
        self.client.call(Method::GET, "rules", None, None).await
    }

    /// Create a price alert rule for a tracked product.
    ///
    pub async fn create_rule(
        &self,
        product_id: &str,
        target_price: f64,
    ) -> Result<PriceRule, ApiError> {
        debug!("Creating rule for product {}...", product_id);
        self.client
            .call(
                Method::POST,
                "rules",
                None,
                Some(json!({ "productId": product_id, "targetPrice": target_price })),
            )
            .await
    }

    /// Delete a price alert rule.
    ///
    pub async fn remove_rule(&self, id: &str) -> Result<(), ApiError> {
        debug!("Removing rule {}...", id);
        self.client
            .call_no_content(Method::DELETE, &format!("rules/{}", id))
            .await
    }

    /// Returns recent credit transactions, windowed to the dashboard range.
    ///
    pub async fn transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        debug!("Requesting credit transactions...");
        let since = (Utc::now() - chrono::Duration::days(TRANSACTION_WINDOW_DAYS))
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        self.client
            .call(
                Method::GET,
                "transactions",
                Some(vec![("since", since.as_str())]),
                None,
            )
            .await
    }

    /// Returns the current credit balance.
    ///
    pub async fn credits(&self) -> Result<CreditBalance, ApiError> {
        debug!("Requesting credit balance...");
        self.client.call(Method::GET, "credits", None, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};
    use httpmock::MockServer;
    use serde_json::json;
    use uuid::Uuid;

    fn test_setup(server: &MockServer) -> (PriceWatch, SessionStore, String) {
        let dir = std::env::temp_dir()
            .join(format!("pricewatch-api-{}", Uuid::new_v4()))
            .to_str()
            .unwrap()
            .to_owned();
        let mut config = Config::new();
        config.load(Some(&dir)).unwrap();
        config.api_base_url = server.base_url();
        let session = SessionStore::new(config.clone());
        let api = PriceWatch::new(&config, session.clone());
        (api, session, dir)
    }

    #[tokio::test]
    async fn test_login_stores_token_and_returns_profile() {
        let profile: Profile = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("POST")
                    .path("/auth/login")
                    .json_body(json!({ "email": "a@b.com", "password": "hunter2" }));
                then.status(200).json_body(json!({
                    "data": {
                        "token": "fresh-token",
                        "profile": {
                            "id": profile.id,
                            "name": profile.name,
                            "email": profile.email,
                            "phone": profile.phone,
                        }
                    },
                    "errorMessages": [],
                    "isSuccessful": true,
                    "statusCode": 200
                }));
            })
            .await;

        let (api, session, dir) = test_setup(&server);
        let returned = api.login("a@b.com", "hunter2").await.unwrap();
        assert_eq!(returned, profile);
        assert_eq!(session.token().as_deref(), Some("fresh-token"));
        mock.assert_async().await;

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_logout_purges_session() {
        let server = MockServer::start_async().await;
        let (api, session, dir) = test_setup(&server);
        session.set_token("tok").unwrap();
        api.logout();
        assert!(session.token().is_none());

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_products_success() {
        let products: [Product; 2] = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/products")
                    .header("Authorization", "Bearer tok");
                then.status(200).json_body(json!({
                    "data": [
                        {
                            "id": products[0].id,
                            "name": products[0].name,
                            "url": products[0].url,
                            "currentPrice": products[0].current_price,
                            "currency": products[0].currency,
                        },
                        {
                            "id": products[1].id,
                            "name": products[1].name,
                            "url": products[1].url,
                            "currentPrice": products[1].current_price,
                            "currency": products[1].currency,
                        }
                    ],
                    "errorMessages": [],
                    "isSuccessful": true,
                    "statusCode": 200
                }));
            })
            .await;

        let (api, session, dir) = test_setup(&server);
        session.set_token("tok").unwrap();
        let returned = api.products().await.unwrap();
        assert_eq!(returned.len(), 2);
        mock.assert_async().await;

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_update_profile_sends_cleaned_phone() {
        let profile: Profile = Faker.fake();
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("PUT")
                    .path("/users/me")
                    .json_body(json!({ "name": "Ayşe", "phone": "5551234567" }));
                then.status(200).json_body(json!({
                    "data": {
                        "id": profile.id,
                        "name": profile.name,
                        "email": profile.email,
                        "phone": profile.phone,
                    },
                    "errorMessages": [],
                    "isSuccessful": true,
                    "statusCode": 200
                }));
            })
            .await;

        let (api, _session, dir) = test_setup(&server);
        api.update_profile("Ayşe", "0 (555) 123 45 67").await.unwrap();
        mock.assert_async().await;

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_transactions_windowed_with_since_param() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("GET")
                    .path("/transactions")
                    .query_param_exists("since");
                then.status(200).json_body(json!({
                    "data": [],
                    "errorMessages": [],
                    "isSuccessful": true,
                    "statusCode": 200
                }));
            })
            .await;

        let (api, _session, dir) = test_setup(&server);
        let transactions = api.transactions().await.unwrap();
        assert!(transactions.is_empty());
        mock.assert_async().await;

        std::fs::remove_dir_all(dir).ok();
    }

    #[tokio::test]
    async fn test_remove_product_tolerates_empty_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method("DELETE").path("/products/42");
                then.status(204);
            })
            .await;

        let (api, _session, dir) = test_setup(&server);
        api.remove_product("42").await.unwrap();
        mock.assert_async().await;

        std::fs::remove_dir_all(dir).ok();
    }
}
