//! Review Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product review
///
/// One review per user per product; only purchasers may review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub product_name: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub user_name: String,
    pub rating: f64,
    pub text: String,
    pub created_at: i64,
}

/// Create review payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub product_number: String,
    pub rating: f64,
    pub text: String,
}
