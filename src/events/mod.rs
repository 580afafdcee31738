//! Event handling module.
//!
//! This module contains the handler for network events: PriceWatch API
//! interactions driven by the UI, applied back onto shared state.

pub mod network;
