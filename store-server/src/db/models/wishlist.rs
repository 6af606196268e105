//! Wishlist Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// One wishlist per user, holding product references without duplicates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wishlist {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub products: Vec<RecordId>,
}

/// Add/remove payload
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistEntry {
    pub product_id: String,
}
