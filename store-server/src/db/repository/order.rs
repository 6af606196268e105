//! Order Repository
//!
//! Orders are written once at placement; afterwards only the status fields
//! and the append-only history change (see checkout::workflow).

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    CancelActor, Order, OrderWithPurchaser, PaymentStatus, StatusEntry,
};
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Projection used by the weekly revenue aggregation
#[derive(Debug, Clone, Deserialize)]
pub struct RevenueRow {
    pub created_at: i64,
    pub final_total: f64,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Does any order carry this human-facing number?
    pub async fn number_exists(&self, number: &str) -> RepoResult<bool> {
        let number_owned = number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE number FROM order WHERE number = $number LIMIT 1")
            .bind(("number", number_owned))
            .await?;
        let found: Vec<String> = result.take(0)?;
        Ok(!found.is_empty())
    }

    /// Persist a freshly placed order
    ///
    /// `user` is stored as a native record link so purchaser fields can be
    /// joined in queries; embedded items keep their "table:id" strings.
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE order SET
                    number = $number,
                    user = $user,
                    user_name = $user_name,
                    items = $items,
                    billing = $billing,
                    shipping = $shipping,
                    payment_method = $payment_method,
                    payment_status = $payment_status,
                    order_status = $order_status,
                    total = $total,
                    shipping_cost = $shipping_cost,
                    final_total = $final_total,
                    total_pkr = $total_pkr,
                    total_usd = $total_usd,
                    final_total_pkr = $final_total_pkr,
                    final_total_usd = $final_total_usd,
                    stripe_payment_id = $stripe_payment_id,
                    status_history = $status_history,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("number", order.number))
            .bind(("user", order.user))
            .bind(("user_name", order.user_name))
            .bind(("items", order.items))
            .bind(("billing", order.billing))
            .bind(("shipping", order.shipping))
            .bind(("payment_method", order.payment_method))
            .bind(("payment_status", order.payment_status))
            .bind(("order_status", order.order_status))
            .bind(("total", order.total))
            .bind(("shipping_cost", order.shipping_cost))
            .bind(("final_total", order.final_total))
            .bind(("total_pkr", order.total_pkr))
            .bind(("total_usd", order.total_usd))
            .bind(("final_total_pkr", order.final_total_pkr))
            .bind(("final_total_usd", order.final_total_usd))
            .bind(("stripe_payment_id", order.stripe_payment_id))
            .bind(("status_history", order.status_history))
            .bind(("created_at", order.created_at))
            .await?;

        let created: Option<Order> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    /// Find order by human-facing number
    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<Order>> {
        let number_owned = number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM order WHERE number = $number LIMIT 1")
            .bind(("number", number_owned))
            .await?;
        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// All orders with the purchaser's email joined in (admin list view)
    pub async fn find_all_with_purchaser(&self) -> RepoResult<Vec<OrderWithPurchaser>> {
        let orders: Vec<OrderWithPurchaser> = self
            .base
            .db()
            .query(
                "SELECT *, user.email AS user_email FROM order ORDER BY created_at DESC",
            )
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders placed by one user, newest first
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE user = $user ORDER BY created_at DESC")
            .bind(("user", user.clone()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Apply a status change and append the history entry
    ///
    /// Only the lifecycle fields are mutable through this path; `None`
    /// parameters leave the stored value untouched.
    pub async fn apply_status_change(
        &self,
        number: &str,
        entry: StatusEntry,
        payment_status: Option<PaymentStatus>,
        cancellation_reason: Option<String>,
        cancelled_by: Option<CancelActor>,
    ) -> RepoResult<Option<Order>> {
        let number_owned = number.to_string();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE order SET
                    order_status = $status,
                    payment_status = $payment_status OR payment_status,
                    cancellation_reason = $reason OR cancellation_reason,
                    cancelled_by = $actor OR cancelled_by,
                    status_history += $entry
                WHERE number = $number
                RETURN AFTER"#,
            )
            .bind(("status", entry.status))
            .bind(("payment_status", payment_status))
            .bind(("reason", cancellation_reason))
            .bind(("actor", cancelled_by))
            .bind(("entry", entry))
            .bind(("number", number_owned))
            .await?;

        let orders: Vec<Order> = result.take(0)?;
        Ok(orders.into_iter().next())
    }

    /// Has this user ever ordered the given product?
    ///
    /// Embedded items store the product reference as a "product:id" string.
    pub async fn user_has_ordered_product(
        &self,
        user: &RecordId,
        product: &RecordId,
    ) -> RepoResult<bool> {
        let product_str = product.to_string();
        let mut result = self
            .base
            .db()
            .query(
                "SELECT VALUE number FROM order \
                 WHERE user = $user AND items.product CONTAINS $product LIMIT 1",
            )
            .bind(("user", user.clone()))
            .bind(("product", product_str))
            .await?;
        let found: Vec<String> = result.take(0)?;
        Ok(!found.is_empty())
    }

    /// Count all orders
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE count() FROM order GROUP ALL")
            .await?;
        let counts: Vec<i64> = result.take(0)?;
        Ok(counts.into_iter().next().unwrap_or(0))
    }

    /// Final totals of every order (summary aggregation)
    pub async fn final_totals(&self) -> RepoResult<Vec<f64>> {
        let totals: Vec<f64> = self
            .base
            .db()
            .query("SELECT VALUE final_total FROM order")
            .await?
            .take(0)?;
        Ok(totals)
    }

    /// Orders created at or after the given timestamp (weekly revenue)
    pub async fn revenue_rows_since(&self, start_millis: i64) -> RepoResult<Vec<RevenueRow>> {
        let rows: Vec<RevenueRow> = self
            .base
            .db()
            .query(
                "SELECT created_at, final_total FROM order WHERE created_at >= $start",
            )
            .bind(("start", start_millis))
            .await?
            .take(0)?;
        Ok(rows)
    }
}
