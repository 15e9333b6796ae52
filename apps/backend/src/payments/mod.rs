//! Payment-intent provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod stripe;

pub use stripe::StripeGateway;

/// Only currency the storefront charges in.
pub const CURRENCY: &str = "usd";

/// A request for a card payment intent of `amount` minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentRequest {
    pub amount: u64,
    pub currency: &'static str,
}

impl IntentRequest {
    pub fn usd_cents(amount: u64) -> Self {
        Self {
            amount,
            currency: CURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment provider unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("payment provider rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("unexpected payment provider response: {0}")]
    Decode(String),
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, request: IntentRequest) -> Result<PaymentIntent, PaymentError>;

    fn provider_name(&self) -> &'static str;
}
