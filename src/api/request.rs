//! Single-flight request state tracking.
//!
//! A [`RequestTracker`] owns one `{loading, error}` pair shared with the UI.
//! Every dashboard operation funnels through [`RequestTracker::run`], which
//! flips the loading flag around the call and captures a display message on
//! failure while passing the original error back to the caller.
//!
//! Overlapping calls are resolved with generation tracking: each `run` bumps
//! a generation counter and only the newest generation may write its outcome
//! back, so a slow, stale response never clobbers the state of a request
//! issued after it. The underlying network call is not cancelled.

use super::error::ApiError;
use std::future::Future;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct TrackerInner {
    loading: bool,
    error: Option<String>,
    generation: u64,
}

/// Shared loading/error pair for one logical request slot.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Clone, Default)]
pub struct RequestTracker {
    inner: Arc<Mutex<TrackerInner>>,
}

impl RequestTracker {
    /// Return a new idle tracker.
    ///
    pub fn new() -> RequestTracker {
        RequestTracker::default()
    }

    /// Whether the most recently issued request is still outstanding.
    ///
    pub fn is_loading(&self) -> bool {
        self.inner.lock().map(|i| i.loading).unwrap_or(false)
    }

    /// Display message captured from the most recent failure, if any.
    ///
    pub fn error(&self) -> Option<String> {
        self.inner.lock().map(|i| i.error.clone()).unwrap_or(None)
    }

    /// Clear loading and error state without issuing a request.
    ///
    pub fn clear(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.loading = false;
            inner.error = None;
        }
    }

    /// Drive a request future while exposing its progress.
    ///
    /// Sets `loading` and clears any previous error before awaiting. On
    /// failure the extracted display message is stored and the original
    /// error is returned unchanged so the caller can still branch on it.
    pub async fn run<T, F>(&self, request: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        let generation = self.begin();
        match request.await {
            Ok(value) => {
                self.finish(generation, None);
                Ok(value)
            }
            Err(error) => {
                self.finish(generation, Some(error.user_message()));
                Err(error)
            }
        }
    }

    fn begin(&self) -> u64 {
        match self.inner.lock() {
            Ok(mut inner) => {
                inner.generation += 1;
                inner.loading = true;
                inner.error = None;
                inner.generation
            }
            Err(_) => 0,
        }
    }

    /// Stale generations are dropped silently; only the newest request may
    /// publish its outcome.
    fn finish(&self, generation: u64, error: Option<String>) {
        if let Ok(mut inner) = self.inner.lock() {
            if inner.generation == generation {
                inner.loading = false;
                inner.error = error;
            }
        }
    }
}
