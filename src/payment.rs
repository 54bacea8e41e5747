// src/payment.rs

//! Payment authorization via an external gateway.
//!
//! The checkout flow only needs one operation: create a payment intent for
//! an amount in cents and hand the client secret back to the frontend. No
//! payment processing happens here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::PaymentConfig;
use crate::error::{AppError, Result};

/// Environment variable holding the gateway secret key.
const SECRET_KEY_ENV: &str = "STRIPE_SECRET_KEY";

/// Minimum chargeable amount in cents.
pub const MIN_AMOUNT_CENTS: i64 = 50;

/// A created payment authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentIntent {
    /// Secret the frontend uses to confirm the payment
    pub client_secret: String,

    /// Gateway-side intent identifier
    pub intent_id: String,
}

/// Port for payment gateway backends.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment intent for the given amount (integer cents).
    async fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent>;
}

/// Stripe-style REST gateway.
#[derive(Clone)]
pub struct StripeGateway {
    client: reqwest::Client,
    api_url: String,
    secret_key: String,
    metadata_source: String,
}

impl StripeGateway {
    /// Create a gateway from configuration and an explicit secret key.
    pub fn new(config: &PaymentConfig, secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            secret_key: secret_key.into(),
            metadata_source: config.metadata_source.clone(),
        }
    }

    /// Create a gateway reading the secret key from the environment.
    pub fn from_env(config: &PaymentConfig) -> Result<Self> {
        let secret_key = std::env::var(SECRET_KEY_ENV)
            .map_err(|_| AppError::config(format!("{SECRET_KEY_ENV} is not set")))?;
        Ok(Self::new(config, secret_key))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_intent(&self, amount: i64, currency: &str) -> Result<PaymentIntent> {
        let amount = amount.to_string();
        let params = [
            ("amount", amount.as_str()),
            ("currency", currency),
            ("automatic_payment_methods[enabled]", "true"),
            ("metadata[source]", self.metadata_source.as_str()),
        ];

        let response = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_url))
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::payment(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::payment(format!("HTTP {}", status.as_u16())));
        }

        let body: IntentResponse = response
            .json()
            .await
            .map_err(|e| AppError::payment(e.to_string()))?;
        Ok(PaymentIntent {
            client_secret: body.client_secret,
            intent_id: body.id,
        })
    }
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    id: String,
    client_secret: String,
}
