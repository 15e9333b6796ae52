use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{IntentRequest, PaymentError, PaymentGateway, PaymentIntent};
use crate::config::PaymentConfig;

/// Creates card payment intents through the Stripe REST API.
#[derive(Clone)]
pub struct StripeGateway {
    client: Client,
    secret_key: String,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

impl StripeGateway {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            client: Client::new(),
            secret_key: config.secret_key.clone(),
            api_base: config.api_base.clone(),
        }
    }

    fn intents_url(&self) -> String {
        format!("{}/v1/payment_intents", self.api_base)
    }
}

fn form_body(request: &IntentRequest) -> Vec<(&'static str, String)> {
    vec![
        ("amount", request.amount.to_string()),
        ("currency", request.currency.to_string()),
        ("payment_method_types[]", "card".to_string()),
    ]
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, request: IntentRequest) -> Result<PaymentIntent, PaymentError> {
        let response = self
            .client
            .post(self.intents_url())
            .bearer_auth(&self.secret_key)
            .form(&form_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, code) = match serde_json::from_str::<ErrorEnvelope>(&body) {
                Ok(envelope) => (envelope.error.message, envelope.error.code),
                Err(_) => (None, None),
            };
            warn!(
                status = status.as_u16(),
                code = code.as_deref().unwrap_or("none"),
                "payment_intent_rejected"
            );
            return Err(PaymentError::Rejected {
                status: status.as_u16(),
                message: message.unwrap_or_else(|| "no message".to_string()),
            });
        }

        let intent: IntentResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Decode(e.to_string()))?;
        let client_secret = intent
            .client_secret
            .ok_or_else(|| PaymentError::Decode("missing client_secret".to_string()))?;

        debug!(intent_id = %intent.id, amount = request.amount, "payment_intent_created");
        Ok(PaymentIntent {
            id: intent.id,
            client_secret,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}
