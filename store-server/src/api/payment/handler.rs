//! Payment API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::services::payments::MIN_CHARGE_CENTS;
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;

/// Create-intent payload; amounts default to PKR
#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "pkr".to_string()
}

/// Create-intent response
#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
}

/// POST /api/payment/create-payment-intent
///
/// PKR amounts are converted to USD via the exchange-rate service; the
/// processor expects integer cents and refuses charges below $0.50.
pub async fn create_payment_intent(
    State(state): State<ServerState>,
    Json(payload): Json<CreateIntentRequest>,
) -> AppResult<Json<CreateIntentResponse>> {
    let amount = payload
        .amount
        .filter(|a| a.is_finite() && *a > 0.0)
        .ok_or_else(|| AppError::new(ErrorCode::InvalidPaymentAmount))?;

    let usd_amount = if payload.currency.eq_ignore_ascii_case("pkr") {
        let rate = state.payments.usd_to_pkr_rate().await?;
        amount / rate
    } else {
        amount
    };

    let amount_cents = (usd_amount * 100.0).round() as i64;
    if amount_cents < MIN_CHARGE_CENTS {
        return Err(AppError::new(ErrorCode::AmountBelowMinimum));
    }

    let client_secret = state.payments.create_payment_intent(amount_cents).await?;

    Ok(Json(CreateIntentResponse { client_secret }))
}
