//! Payment-intent creation and currency conversion
//!
//! Two outbound collaborators reached over HTTP:
//! - the exchange-rate service (PKR → USD conversion rate)
//! - Stripe (payment-intent creation, form-encoded API)

use serde::Deserialize;
use std::time::Duration;

use crate::core::Config;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;

/// Stripe payment intents endpoint
const STRIPE_PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// Stripe minimum charge: $0.50
pub const MIN_CHARGE_CENTS: i64 = 50;

/// Outbound request timeout
const PAYMENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Deserialize)]
struct ExchangeRateResponse {
    result: String,
    conversion_rate: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    client_secret: String,
}

/// Payment processor client
#[derive(Clone, Debug)]
pub struct PaymentService {
    client: reqwest::Client,
    stripe_secret_key: String,
    exchange_rate_url: String,
}

impl PaymentService {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(PAYMENT_TIMEOUT)
            .build()
            .expect("Failed to build payment HTTP client");

        Self {
            client,
            stripe_secret_key: config.stripe_secret_key.clone(),
            exchange_rate_url: config.exchange_rate_url.clone(),
        }
    }

    /// Fetch the current USD→PKR conversion rate
    pub async fn usd_to_pkr_rate(&self) -> AppResult<f64> {
        let response = self
            .client
            .get(&self.exchange_rate_url)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Exchange rate request failed");
                AppError::new(ErrorCode::ExchangeRateUnavailable)
            })?;

        let body: ExchangeRateResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Exchange rate response malformed");
            AppError::new(ErrorCode::ExchangeRateUnavailable)
        })?;

        match (body.result.as_str(), body.conversion_rate) {
            ("success", Some(rate)) if rate > 0.0 => Ok(rate),
            _ => Err(AppError::new(ErrorCode::ExchangeRateUnavailable)),
        }
    }

    /// Create a card payment intent for the given amount in USD cents
    ///
    /// Returns the client secret the frontend needs to confirm the payment.
    pub async fn create_payment_intent(&self, amount_cents: i64) -> AppResult<String> {
        let idempotency_key = uuid::Uuid::new_v4().to_string();
        let params = [
            ("amount", amount_cents.to_string()),
            ("currency", "usd".to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .client
            .post(STRIPE_PAYMENT_INTENTS_URL)
            .bearer_auth(&self.stripe_secret_key)
            .header("Idempotency-Key", idempotency_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Payment intent request failed");
                AppError::new(ErrorCode::PaymentFailed)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Payment processor rejected intent");
            return Err(AppError::new(ErrorCode::PaymentFailed));
        }

        let intent: PaymentIntentResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "Payment intent response malformed");
            AppError::new(ErrorCode::PaymentFailed)
        })?;

        Ok(intent.client_secret)
    }
}
