use serde::Serialize;
use serde_json::Value;

use crate::domain::price::{coerce_price, to_minor_units};
use crate::error::AppError;
use crate::payments::{IntentRequest, PaymentGateway};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSecret {
    pub client_secret: String,
}

/// Create a card payment intent for `price` (major units, truncated to
/// whole cents).
pub async fn create_payment_intent(
    gateway: &dyn PaymentGateway,
    price: Option<&Value>,
) -> Result<ClientSecret, AppError> {
    let amount = coerce_price(price)
        .and_then(to_minor_units)
        .map_err(|e| AppError::bad_request(format!("price must be a positive amount ({e})")))?;

    let intent = gateway.create_intent(IntentRequest::usd_cents(amount)).await?;
    tracing::info!(intent_id = %intent.id, amount, "payment_intent_created");
    Ok(ClientSecret {
        client_secret: intent.client_secret,
    })
}
