//! Client-side engine for the PriceWatch price-tracking dashboard.
//!
//! This crate contains everything the dashboard needs short of a rendering
//! layer: declarative form validation, a session-aware HTTP client for the
//! PriceWatch REST API, single-flight request state tracking, phone number
//! normalization, and the application state the UI renders from.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod session;
pub mod state;
pub mod utils;
pub mod validation;
