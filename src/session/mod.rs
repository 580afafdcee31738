//! Session credential management.
//!
//! The bearer token lives in two storage locations: an in-memory cache read
//! on every outgoing request, and the configuration file that survives
//! restarts. Both locations are written on sign-in and emptied on sign-out
//! or when the API answers with 401.
//!
//! The 401 reaction itself is not a hard-coded redirect: the HTTP client
//! publishes an [`AuthEvent`] on a broadcast channel and the application
//! state decides where to navigate.

use crate::config::Config;
use crate::error::AppResult;
use log::*;
use std::sync::{Arc, Mutex, RwLock};

/// Session-level events published by the transport layer.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The API rejected the stored credential; it has been purged.
    SessionExpired,
}

/// Owns the bearer credential across both storage locations.
///
/// Cheap to clone; all clones share the same underlying storage.
#[derive(Clone)]
pub struct SessionStore {
    cached: Arc<RwLock<Option<String>>>,
    config: Arc<Mutex<Config>>,
}

impl SessionStore {
    /// Return a new instance seeded from the token persisted in the
    /// configuration, if any.
    ///
    pub fn new(config: Config) -> SessionStore {
        let cached = config.access_token.clone();
        SessionStore {
            cached: Arc::new(RwLock::new(cached)),
            config: Arc::new(Mutex::new(config)),
        }
    }

    /// Return the current bearer token, if a session is active.
    ///
    pub fn token(&self) -> Option<String> {
        self.cached.read().map(|t| t.clone()).unwrap_or(None)
    }

    /// Store a new bearer token in both locations.
    ///
    pub fn set_token(&self, token: &str) -> AppResult<()> {
        if let Ok(mut cached) = self.cached.write() {
            *cached = Some(token.to_owned());
        }
        if let Ok(mut config) = self.config.lock() {
            config.save_token(token.to_owned())?;
        }
        Ok(())
    }

    /// Delete the credential from both locations.
    ///
    /// Persistence failures are logged rather than propagated: the in-memory
    /// half is already gone and the session must be treated as ended.
    pub fn purge(&self) {
        if let Ok(mut cached) = self.cached.write() {
            *cached = None;
        }
        if let Ok(mut config) = self.config.lock() {
            if let Err(e) = config.clear_token() {
                error!("Failed to clear persisted credential: {}", e);
            }
        }
    }
}
