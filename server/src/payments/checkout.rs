//! Checkout Session Client
//!
//! Thin client over the payment provider's hosted-checkout API. The
//! session carries one line item for the full booking total plus
//! metadata linking back to our record; discounts are already folded
//! into the amount, the provider never sees negative lines.

use crate::utils::error::AppError;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Checkout request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Checkout API returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        AppError::upstream(err.to_string())
    }
}

/// Configuration for the hosted checkout provider
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// API origin, e.g. "https://api.stripe.com"
    pub api_base: String,
    pub secret_key: String,
    /// ISO currency code, lowercase
    pub currency: String,
    pub success_url: String,
    pub cancel_url: String,
    pub timeout: Duration,
}

/// What to charge and how to find our record again from the webhook
#[derive(Debug, Clone)]
pub struct SessionRequest {
    pub customer_email: String,
    /// Line-item label shown on the hosted page
    pub description: String,
    pub amount_pence: i64,
    pub metadata: Vec<(String, String)>,
}

/// Provider session handle; `url` is where the customer goes to pay
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

#[derive(Clone)]
pub struct CheckoutService {
    client: reqwest::Client,
    config: CheckoutConfig,
}

impl CheckoutService {
    pub fn new(config: CheckoutConfig) -> Result<Self, CheckoutError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client, config })
    }

    pub async fn create_session(
        &self,
        request: SessionRequest,
    ) -> Result<CheckoutSession, CheckoutError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("customer_email".to_string(), request.customer_email),
            ("success_url".to_string(), self.config.success_url.clone()),
            ("cancel_url".to_string(), self.config.cancel_url.clone()),
            (
                "line_items[0][price_data][currency]".to_string(),
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                request.description,
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                request.amount_pence.to_string(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
        ];
        for (key, value) in request.metadata {
            form.push((format!("metadata[{}]", key), value));
        }

        let response = self
            .client
            .post(format!("{}/v1/checkout/sessions", self.config.api_base))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(%status, %body, "Checkout session creation failed");
            return Err(CheckoutError::Api { status, body });
        }

        let session: CheckoutSession = response.json().await?;
        tracing::info!(session_id = %session.id, "Created checkout session");
        Ok(session)
    }
}
