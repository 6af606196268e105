//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// Per-color stock entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStock {
    pub color: String,
    pub stock: i64,
}

/// Derived availability status
///
/// Recomputed whenever stock changes; never set independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out Of Stock")]
    OutOfStock,
}

impl StockStatus {
    /// Derive status from an aggregate stock count
    pub fn from_stock(stock: i64) -> Self {
        if stock > 0 {
            Self::InStock
        } else {
            Self::OutOfStock
        }
    }
}

/// Catalog product
///
/// `number` is the human-facing 4-digit identifier, distinct from the
/// record id. Aggregate `stock` for a product with tracked colors is always
/// the sum of the color stocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<ProductId>,
    pub number: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub colors: Vec<ColorStock>,
    pub status: StockStatus,
    #[serde(default)]
    pub ratings: f64,
    #[serde(default)]
    pub reviews_count: i64,
}

/// Create product payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub category: String,
    pub price: f64,
    pub discounted_price: Option<f64>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub colors: Vec<ColorStock>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub discounted_price: Option<f64>,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub images: Option<Vec<String>>,
    pub stock: Option<i64>,
    pub colors: Option<Vec<ColorStock>>,
}

/// Trimmed projection for the top-rated dashboard listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRatingSummary {
    pub number: String,
    pub name: String,
    pub ratings: f64,
    pub status: StockStatus,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_stock() {
        assert_eq!(StockStatus::from_stock(1), StockStatus::InStock);
        assert_eq!(StockStatus::from_stock(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_stock(-1), StockStatus::OutOfStock);
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&StockStatus::InStock).unwrap(),
            "\"In Stock\""
        );
        assert_eq!(
            serde_json::to_string(&StockStatus::OutOfStock).unwrap(),
            "\"Out Of Stock\""
        );
    }
}
