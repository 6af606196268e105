//! Cart Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// A single line in a cart
///
/// Name, image and price are snapshots taken from the catalog when the line
/// was added, not live references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub quantity: i64,
}

impl CartItem {
    /// Two lines merge when product, size and color all match
    pub fn matches(&self, product: &RecordId, size: Option<&str>, color: Option<&str>) -> bool {
        &self.product == product
            && self.size.as_deref() == size
            && self.color.as_deref() == color
    }
}

/// One cart per user; created lazily on first add, emptied (not deleted)
/// on successful order placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    #[serde(default)]
    pub items: Vec<CartItem>,
    pub updated_at: i64,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Deserialize)]
pub struct CartAddItem {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Quantity update payload
#[derive(Debug, Clone, Deserialize)]
pub struct CartUpdateItem {
    pub product_id: String,
    pub quantity: i64,
    pub size: Option<String>,
    pub color: Option<String>,
}

/// Remove-line payload
#[derive(Debug, Clone, Deserialize)]
pub struct CartRemoveItem {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
}
