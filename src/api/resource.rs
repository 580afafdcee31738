use fake::Dummy;
use serde::{Deserialize, Serialize};

/// Defines account profile data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Defines tracked product data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub url: String,
    pub current_price: f64,
    pub currency: String,
}

/// Defines price alert rule data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRule {
    pub id: String,
    pub product_id: String,
    pub target_price: f64,
    pub active: bool,
}

/// Defines credit transaction data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: f64,
    pub created_at: Option<String>,
}

/// Defines credit balance data structure.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditBalance {
    pub total: u32,
    pub used: u32,
    pub remaining: u32,
}

/// Defines the payload returned by a successful sign-in.
///
#[derive(Clone, Debug, Deserialize, Dummy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub token: String,
    pub profile: Profile,
}
