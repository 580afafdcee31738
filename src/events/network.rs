use crate::api::PriceWatch;
use crate::state::{Route, State};
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different network event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    SignIn {
        email: String,
        password: String,
    },
    SignOut,
    FetchProfile,
    UpdateProfile {
        name: String,
        phone: String,
    },
    FetchProducts,
    TrackProduct {
        url: String,
        name: String,
    },
    RemoveProduct {
        id: String,
    },
    FetchRules,
    CreateRule {
        product_id: String,
        target_price: f64,
    },
    RemoveRule {
        id: String,
    },
    FetchTransactions,
    FetchCredits,
}

/// Specify struct for managing state with network events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    api: &'a PriceWatch,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, api: &'a PriceWatch) -> Self {
        Handler { state, api }
    }

    /// Handle network events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing network event '{:?}'...", event);
        match event {
            Event::SignIn { email, password } => self.sign_in(email, password).await?,
            Event::SignOut => self.sign_out().await?,
            Event::FetchProfile => self.fetch_profile().await?,
            Event::UpdateProfile { name, phone } => self.update_profile(name, phone).await?,
            Event::FetchProducts => self.fetch_products().await?,
            Event::TrackProduct { url, name } => self.track_product(url, name).await?,
            Event::RemoveProduct { id } => self.remove_product(id).await?,
            Event::FetchRules => self.fetch_rules().await?,
            Event::CreateRule {
                product_id,
                target_price,
            } => self.create_rule(product_id, target_price).await?,
            Event::RemoveRule { id } => self.remove_rule(id).await?,
            Event::FetchTransactions => self.fetch_transactions().await?,
            Event::FetchCredits => self.fetch_credits().await?,
        }
        Ok(())
    }

    /// Sign in and move to the dashboard on success.
    ///
    async fn sign_in(&mut self, email: String, password: String) -> Result<()> {
        info!("Signing in {}...", email);
        let tracker = { self.state.lock().await.requests() };
        let profile = tracker.run(self.api.login(&email, &password)).await?;
        let mut state = self.state.lock().await;
        state.set_profile(profile);
        state.set_route(Route::Dashboard);
        info!("Signed in successfully.");
        Ok(())
    }

    /// Sign out, purge the credential, and drop account data.
    ///
    async fn sign_out(&mut self) -> Result<()> {
        info!("Signing out...");
        self.api.logout();
        let mut state = self.state.lock().await;
        state.clear_account_data();
        state.set_route(Route::Login);
        Ok(())
    }

    /// Update state with the authenticated profile.
    ///
    async fn fetch_profile(&mut self) -> Result<()> {
        info!("Fetching profile...");
        let tracker = { self.state.lock().await.requests() };
        let profile = tracker.run(self.api.me()).await?;
        self.state.lock().await.set_profile(profile);
        info!("Profile loaded.");
        Ok(())
    }

    /// Update the profile and store the returned copy.
    ///
    async fn update_profile(&mut self, name: String, phone: String) -> Result<()> {
        info!("Updating profile...");
        let tracker = { self.state.lock().await.requests() };
        let profile = tracker.run(self.api.update_profile(&name, &phone)).await?;
        self.state.lock().await.set_profile(profile);
        info!("Profile updated successfully.");
        Ok(())
    }

    /// Update state with tracked products.
    ///
    async fn fetch_products(&mut self) -> Result<()> {
        info!("Fetching tracked products...");
        let tracker = { self.state.lock().await.requests() };
        let products = tracker.run(self.api.products()).await?;
        info!("Received {} tracked products.", products.len());
        self.state.lock().await.set_products(products);
        Ok(())
    }

    /// Track a new product, then refresh the list.
    ///
    async fn track_product(&mut self, url: String, name: String) -> Result<()> {
        info!("Tracking product '{}'...", name);
        let tracker = { self.state.lock().await.requests() };
        let product = tracker.run(self.api.track_product(&url, &name)).await?;
        info!("Product '{}' tracked with id {}.", product.name, product.id);
        self.fetch_products().await?;
        Ok(())
    }

    /// Stop tracking a product, then refresh the list.
    ///
    async fn remove_product(&mut self, id: String) -> Result<()> {
        info!("Removing product {}...", id);
        let tracker = { self.state.lock().await.requests() };
        tracker.run(self.api.remove_product(&id)).await?;
        info!("Product {} removed.", id);
        self.fetch_products().await?;
        Ok(())
    }

    /// Update state with price rules.
    ///
    async fn fetch_rules(&mut self) -> Result<()> {
        info!("Fetching price rules...");
        let tracker = { self.state.lock().await.requests() };
        let rules = tracker.run(self.api.rules()).await?;
        info!("Received {} price rules.", rules.len());
        self.state.lock().await.set_rules(rules);
        Ok(())
    }

    /// Create a price rule, then refresh the list.
    ///
    async fn create_rule(&mut self, product_id: String, target_price: f64) -> Result<()> {
        info!("Creating rule for product {}...", product_id);
        let tracker = { self.state.lock().await.requests() };
        tracker
            .run(self.api.create_rule(&product_id, target_price))
            .await?;
        info!("Rule created successfully.");
        self.fetch_rules().await?;
        Ok(())
    }

    /// Delete a price rule, then refresh the list.
    ///
    async fn remove_rule(&mut self, id: String) -> Result<()> {
        info!("Removing rule {}...", id);
        let tracker = { self.state.lock().await.requests() };
        tracker.run(self.api.remove_rule(&id)).await?;
        info!("Rule {} removed.", id);
        self.fetch_rules().await?;
        Ok(())
    }

    /// Update state with recent credit transactions.
    ///
    async fn fetch_transactions(&mut self) -> Result<()> {
        info!("Fetching credit transactions...");
        let tracker = { self.state.lock().await.requests() };
        let transactions = tracker.run(self.api.transactions()).await?;
        info!("Received {} transactions.", transactions.len());
        self.state.lock().await.set_transactions(transactions);
        Ok(())
    }

    /// Update state with the credit balance.
    ///
    async fn fetch_credits(&mut self) -> Result<()> {
        info!("Fetching credit balance...");
        let tracker = { self.state.lock().await.requests() };
        let credits = tracker.run(self.api.credits()).await?;
        self.state.lock().await.set_credits(credits);
        info!("Credit balance loaded.");
        Ok(())
    }
}
