//! Inventory adjustment
//!
//! Pure function of (product, line item) → updated stock fields.
//! Stock never goes negative; aggregate stock for a product with tracked
//! color variants is always the sum of variant stocks.

use crate::db::models::{ColorStock, Product, StockStatus};

/// Result of applying one line item to a product's stock
#[derive(Debug, Clone, PartialEq)]
pub struct StockAdjustment {
    pub stock: i64,
    pub colors: Vec<ColorStock>,
    pub status: StockStatus,
}

/// Apply a line item to a product's stock fields
///
/// - With a color variant on a color-tracked product: decrement that
///   variant floor-clamped at zero, then re-derive the aggregate as the
///   sum of variant stocks (an unknown color leaves the variants alone
///   but still re-derives the aggregate).
/// - Otherwise: decrement the aggregate directly, floor-clamped at zero.
pub fn apply_line_item(product: &Product, color: Option<&str>, quantity: i64) -> StockAdjustment {
    let mut colors = product.colors.clone();

    let stock = match color {
        Some(color) if !colors.is_empty() => {
            if let Some(variant) = colors.iter_mut().find(|c| c.color == color) {
                variant.stock = (variant.stock - quantity).max(0);
            }
            colors.iter().map(|c| c.stock).sum()
        }
        _ => (product.stock - quantity).max(0),
    };

    StockAdjustment {
        stock,
        status: StockStatus::from_stock(stock),
        colors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, colors: Vec<ColorStock>) -> Product {
        Product {
            id: None,
            number: "1000".into(),
            name: "Test shirt".into(),
            category: "shirts".into(),
            price: 25.0,
            discounted_price: None,
            short_description: None,
            description: None,
            image_url: None,
            images: Vec::new(),
            stock,
            colors,
            status: StockStatus::from_stock(stock),
            ratings: 0.0,
            reviews_count: 0,
        }
    }

    fn color(name: &str, stock: i64) -> ColorStock {
        ColorStock {
            color: name.into(),
            stock,
        }
    }

    #[test]
    fn test_variant_decrement_and_aggregate_sum() {
        // {red:5, blue:3}, order 2 red → red=3, blue=3, aggregate=6
        let p = product(8, vec![color("red", 5), color("blue", 3)]);
        let adj = apply_line_item(&p, Some("red"), 2);

        assert_eq!(adj.colors, vec![color("red", 3), color("blue", 3)]);
        assert_eq!(adj.stock, 6);
        assert_eq!(adj.status, StockStatus::InStock);
    }

    #[test]
    fn test_variant_clamped_at_zero() {
        let p = product(4, vec![color("red", 1), color("blue", 3)]);
        let adj = apply_line_item(&p, Some("red"), 5);

        assert_eq!(adj.colors, vec![color("red", 0), color("blue", 3)]);
        assert_eq!(adj.stock, 3);
    }

    #[test]
    fn test_unknown_color_rederives_aggregate() {
        let p = product(10, vec![color("red", 5), color("blue", 3)]);
        let adj = apply_line_item(&p, Some("green"), 2);

        // Variants untouched, aggregate re-derived as their sum
        assert_eq!(adj.colors, p.colors);
        assert_eq!(adj.stock, 8);
    }

    #[test]
    fn test_plain_decrement() {
        let p = product(10, Vec::new());
        let adj = apply_line_item(&p, None, 4);

        assert_eq!(adj.stock, 6);
        assert!(adj.colors.is_empty());
        assert_eq!(adj.status, StockStatus::InStock);
    }

    #[test]
    fn test_plain_decrement_clamped_at_zero() {
        let p = product(3, Vec::new());
        let adj = apply_line_item(&p, None, 7);

        assert_eq!(adj.stock, 0);
        assert_eq!(adj.status, StockStatus::OutOfStock);
    }

    #[test]
    fn test_color_on_untracked_product_falls_back_to_aggregate() {
        let p = product(5, Vec::new());
        let adj = apply_line_item(&p, Some("red"), 2);

        assert_eq!(adj.stock, 3);
    }

    #[test]
    fn test_exact_depletion_goes_out_of_stock() {
        let p = product(2, vec![color("red", 2)]);
        let adj = apply_line_item(&p, Some("red"), 2);

        assert_eq!(adj.stock, 0);
        assert_eq!(adj.status, StockStatus::OutOfStock);
    }
}
