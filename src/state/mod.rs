//! Application state management module.
//!
//! This module contains the core state management for the dashboard,
//! including:
//! - Main `State` struct that holds all application data
//! - Navigation types (Route)
//! - Form value state (FormState)
//! - State error handling

mod error;
mod form;
mod navigation;

pub use error::StateError;
pub use form::FormState;
pub use navigation::Route;

use crate::api::{CreditBalance, PriceRule, Product, Profile, RequestTracker, Transaction};
use log::*;

/// Holds everything the dashboard renders from.
///
pub struct State {
    route: Route,
    profile: Option<Profile>,
    products: Vec<Product>,
    rules: Vec<PriceRule>,
    transactions: Vec<Transaction>,
    credits: Option<CreditBalance>,
    requests: RequestTracker,
    login_form: FormState,
}

impl State {
    /// Return a new instance at the login route.
    ///
    pub fn new() -> State {
        State {
            route: Route::Login,
            profile: None,
            products: vec![],
            rules: vec![],
            transactions: vec![],
            credits: None,
            requests: RequestTracker::new(),
            login_form: FormState::new(),
        }
    }

    pub fn current_route(&self) -> Route {
        self.route
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    pub fn get_profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Return the profile or an error when no session is active.
    ///
    pub fn profile_required(&self) -> Result<&Profile, StateError> {
        self.profile.as_ref().ok_or(StateError::ProfileNotSet)
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    pub fn get_products(&self) -> &[Product] {
        &self.products
    }

    pub fn set_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn get_rules(&self) -> &[PriceRule] {
        &self.rules
    }

    pub fn set_rules(&mut self, rules: Vec<PriceRule>) {
        self.rules = rules;
    }

    pub fn get_transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
    }

    pub fn get_credits(&self) -> Option<&CreditBalance> {
        self.credits.as_ref()
    }

    pub fn set_credits(&mut self, credits: CreditBalance) {
        self.credits = Some(credits);
    }

    /// Shared request tracker; clones observe the same loading/error pair.
    ///
    pub fn requests(&self) -> RequestTracker {
        self.requests.clone()
    }

    pub fn login_form(&self) -> &FormState {
        &self.login_form
    }

    pub fn login_form_mut(&mut self) -> &mut FormState {
        &mut self.login_form
    }

    /// React to a purged session: drop account data and navigate to the
    /// login route unless already there.
    ///
    pub fn on_session_expired(&mut self) {
        if self.route == Route::Login {
            debug!("Session expired while already on login route.");
            return;
        }
        warn!("Session expired; returning to login route.");
        self.profile = None;
        self.products.clear();
        self.rules.clear();
        self.transactions.clear();
        self.credits = None;
        self.route = Route::Login;
    }

    /// Drop all account-scoped data on sign-out.
    ///
    pub fn clear_account_data(&mut self) {
        self.profile = None;
        self.products.clear();
        self.rules.clear();
        self.transactions.clear();
        self.credits = None;
        self.requests.clear();
        self.login_form.clear();
    }
}

impl Default for State {
    fn default() -> Self {
        State::new()
    }
}
