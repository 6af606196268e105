//! Order Model
//!
//! 订单是下单时的快照：商品行、账单/收货信息、金额都在创建时固化，
//! 之后只有状态流转可以修改 (见 checkout::workflow)。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

// =============================================================================
// Enums
// =============================================================================

/// How the purchaser pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[serde(rename = "card")]
    Card,
    #[serde(rename = "cash-on-delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// Initial order status derived from the payment method:
    /// card payments are already settled, cash waits for acceptance
    pub fn initial_status(&self) -> OrderStatus {
        match self {
            Self::Card => OrderStatus::Accepted,
            Self::CashOnDelivery => OrderStatus::Pending,
        }
    }
}

/// Payment lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Order lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Accepted,
    OutForDelivery,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Human-readable label used in notification emails
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Order Received",
            Self::Accepted => "Order Accepted",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
            Self::Failed => "Failed",
        }
    }

    /// A purchaser may self-cancel only before the order is final
    pub fn is_self_cancellable(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Delivered)
    }
}

/// Who cancelled an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CancelActor {
    Admin,
    User,
}

// =============================================================================
// Embedded structures
// =============================================================================

/// Order line item — a snapshot copied from the cart at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    #[serde(with = "serde_helpers::record_id")]
    pub product: RecordId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    pub price: f64,
    pub quantity: i64,
}

/// Billing address and contact snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BillingDetails {
    /// Placement requires at least one contact channel
    pub fn has_contact(&self) -> bool {
        self.email.as_deref().is_some_and(|e| !e.is_empty())
            || self.phone.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Shipping address snapshot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// One entry in the append-only status history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEntry {
    pub status: OrderStatus,
    pub at: i64,
}

// =============================================================================
// Order
// =============================================================================

/// Placed order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    /// Human-facing 4-digit order number, unique across all orders
    pub number: String,
    #[serde(with = "serde_helpers::record_id")]
    pub user: RecordId,
    pub user_name: String,
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub billing: BillingDetails,
    #[serde(default)]
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub total: f64,
    pub shipping_cost: f64,
    pub final_total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pkr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_total_pkr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_total_usd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stripe_payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancellation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_by: Option<CancelActor>,
    pub status_history: Vec<StatusEntry>,
    pub created_at: i64,
}

// =============================================================================
// API Request / Response Types
// =============================================================================

/// Place-order payload
///
/// Totals are trusted as supplied by the caller — no server-side price
/// recomputation (see DESIGN.md).
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub billing: BillingDetails,
    #[serde(default)]
    pub shipping: ShippingDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: Option<PaymentStatus>,
    pub total: f64,
    pub shipping_cost: f64,
    pub final_total: f64,
    pub stripe_payment_id: Option<String>,
    pub total_pkr: Option<f64>,
    pub total_usd: Option<f64>,
    pub final_total_pkr: Option<f64>,
    pub final_total_usd: Option<f64>,
}

/// Admin status-change payload
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
    pub reason: Option<String>,
    pub cancelled_by: Option<CancelActor>,
}

/// Self-service cancellation payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelRequest {
    pub reason: Option<String>,
}

/// Order with purchaser email joined in (admin list view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithPurchaser {
    #[serde(flatten)]
    pub order: Order,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status_from_payment_method() {
        assert_eq!(PaymentMethod::Card.initial_status(), OrderStatus::Accepted);
        assert_eq!(
            PaymentMethod::CashOnDelivery.initial_status(),
            OrderStatus::Pending
        );
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::OutForDelivery).unwrap(),
            "\"out-for-delivery\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cash-on-delivery\""
        );
    }

    #[test]
    fn test_self_cancellable() {
        assert!(OrderStatus::Pending.is_self_cancellable());
        assert!(OrderStatus::Accepted.is_self_cancellable());
        assert!(OrderStatus::OutForDelivery.is_self_cancellable());
        assert!(!OrderStatus::Delivered.is_self_cancellable());
        assert!(!OrderStatus::Cancelled.is_self_cancellable());
    }

    #[test]
    fn test_billing_contact() {
        let mut billing = BillingDetails::default();
        assert!(!billing.has_contact());

        billing.phone = Some("03001234567".into());
        assert!(billing.has_contact());

        billing.phone = Some(String::new());
        billing.email = Some("jane@example.com".into());
        assert!(billing.has_contact());
    }
}
