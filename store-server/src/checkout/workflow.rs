//! Order workflow orchestration
//!
//! Composes number allocation, inventory adjustment, cart clearing and
//! notification into the two order entry points:
//!
//! - [`place_order`]: place order → adjust inventory → clear cart → respond
//! - [`transition_status`] / [`cancel_own_order`]: change status → adjust
//!   payment status → append history → notify
//!
//! The multi-step placement sequence is NOT transactional: each step is an
//! independent write, a per-item stock failure never blocks the remaining
//! items, and a cart-clear failure is not rolled back.

use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::checkout::order_number::{self, AllocError};
use crate::checkout::inventory;
use crate::core::ServerState;
use crate::db::models::{
    CancelActor, Order, OrderStatus, PaymentMethod, PaymentStatus, PlaceOrderRequest,
    StatusEntry,
};
use crate::db::repository::{CartRepository, OrderRepository, ProductRepository};
use crate::utils::{AppError, AppResult, time};
use shared::ErrorCode;

/// Requested status change (admin path or self-cancellation)
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: OrderStatus,
    pub reason: Option<String>,
    pub cancelled_by: Option<CancelActor>,
}

/// Place a new order for the authenticated purchaser
///
/// Steps, in order, each a separate persistence write:
/// 1. Allocate the order number; abort on failure with no side effects.
/// 2. Persist the order with status derived from the payment method.
/// 3. Per line item: decrement stock (missing products are skipped with a
///    warning, partial application is accepted).
/// 4. Clear the purchaser's cart (failure logged, not rolled back).
pub async fn place_order(
    state: &ServerState,
    purchaser: &CurrentUser,
    req: PlaceOrderRequest,
) -> AppResult<Order> {
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if !req.billing.has_contact() {
        return Err(AppError::new(ErrorCode::MissingBillingContact));
    }

    let user: RecordId = purchaser
        .id
        .parse()
        .map_err(|_| AppError::invalid(format!("Invalid user id: {}", purchaser.id)))?;

    let order_repo = OrderRepository::new(state.db.clone());

    // 1. Allocate the human-facing number; exhaustion aborts the placement
    let number = match order_number::allocate(&order_repo).await {
        Ok(number) => number,
        Err(AllocError::Exhausted(attempts)) => {
            tracing::error!(attempts, "Order number allocation exhausted");
            return Err(AppError::new(ErrorCode::OrderNumberExhausted));
        }
        Err(AllocError::Repo(e)) => return Err(AppError::database(e.to_string())),
    };

    let now = time::now_millis();
    let initial_status = req.payment_method.initial_status();

    // Totals are trusted as supplied; PKR mirrors default to the base values
    let order = Order {
        id: None,
        number,
        user: user.clone(),
        user_name: purchaser.name.clone(),
        items: req.items,
        billing: req.billing,
        shipping: req.shipping,
        payment_method: req.payment_method,
        payment_status: req.payment_status.unwrap_or(PaymentStatus::Pending),
        order_status: initial_status,
        total: req.total,
        shipping_cost: req.shipping_cost,
        final_total: req.final_total,
        total_pkr: req.total_pkr.or(Some(req.total)),
        total_usd: req.total_usd,
        final_total_pkr: req.final_total_pkr.or(Some(req.final_total)),
        final_total_usd: req.final_total_usd,
        stripe_payment_id: req.stripe_payment_id,
        cancellation_reason: None,
        cancelled_by: None,
        status_history: vec![StatusEntry {
            status: initial_status,
            at: now,
        }],
        created_at: now,
    };

    // 2. Persist the order
    let order = order_repo
        .create(order)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        number = %order.number,
        user = %purchaser.id,
        items = order.items.len(),
        final_total = order.final_total,
        "Order placed"
    );

    // 3. Decrement stock per line item; partial application is accepted
    let product_repo = ProductRepository::new(state.db.clone());
    for item in &order.items {
        let product = match product_repo.find_by_id(&item.product).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                tracing::warn!(
                    order = %order.number,
                    product = %item.product,
                    "Ordered product missing from catalog, skipping stock adjustment"
                );
                continue;
            }
            Err(e) => {
                tracing::warn!(
                    order = %order.number,
                    product = %item.product,
                    error = %e,
                    "Product lookup failed, skipping stock adjustment"
                );
                continue;
            }
        };

        let adjustment =
            inventory::apply_line_item(&product, item.color.as_deref(), item.quantity);

        let Some(product_id) = product.id else {
            continue;
        };
        if let Err(e) = product_repo
            .save_stock(
                &product_id,
                adjustment.stock,
                adjustment.colors,
                adjustment.status,
            )
            .await
        {
            tracing::warn!(
                order = %order.number,
                product = %product_id,
                error = %e,
                "Failed to persist stock adjustment"
            );
        }
    }

    // 4. Clear the purchaser's cart; accepted inconsistency on failure
    let cart_repo = CartRepository::new(state.db.clone());
    if let Err(e) = cart_repo.clear(&user).await {
        tracing::warn!(
            order = %order.number,
            user = %purchaser.id,
            error = %e,
            "Failed to clear cart after order placement"
        );
    }

    Ok(order)
}

/// Apply a status change to an order
///
/// Cash-on-delivery payments are marked paid when the order is accepted or
/// delivered. The history entry is appended unconditionally; afterwards the
/// purchaser is notified on a detached task (best effort).
pub async fn transition_status(
    state: &ServerState,
    number: &str,
    change: StatusChange,
) -> AppResult<Order> {
    let order_repo = OrderRepository::new(state.db.clone());

    let order = order_repo
        .find_by_number(number)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", number))
        })?;

    // Cash is collected on these milestones
    let payment_status = if matches!(change.status, OrderStatus::Accepted | OrderStatus::Delivered)
        && order.payment_method == PaymentMethod::CashOnDelivery
    {
        Some(PaymentStatus::Paid)
    } else {
        None
    };

    let (reason, actor) = if change.status == OrderStatus::Cancelled {
        (change.reason, change.cancelled_by)
    } else {
        (None, None)
    };

    let entry = StatusEntry {
        status: change.status,
        at: time::now_millis(),
    };

    let updated = order_repo
        .apply_status_change(number, entry, payment_status, reason, actor)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", number))
        })?;

    tracing::info!(
        number = %updated.number,
        status = ?updated.order_status,
        payment_status = ?updated.payment_status,
        "Order status updated"
    );

    notify_status_change(state, &updated);

    Ok(updated)
}

/// Self-service cancellation by the purchaser
///
/// Permitted only for orders owned by the requesting user and only while
/// the current status is neither cancelled nor delivered.
pub async fn cancel_own_order(
    state: &ServerState,
    purchaser: &CurrentUser,
    number: &str,
    reason: Option<String>,
) -> AppResult<Order> {
    let order_repo = OrderRepository::new(state.db.clone());

    let order = order_repo
        .find_by_number(number)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::OrderNotFound, format!("Order {} not found", number))
        })?;

    if order.user.to_string() != purchaser.id {
        return Err(AppError::new(ErrorCode::NotResourceOwner));
    }
    if !order.order_status.is_self_cancellable() {
        return Err(AppError::with_message(
            ErrorCode::OrderNotCancellable,
            format!(
                "Order {} can no longer be cancelled (status: {})",
                number,
                order.order_status.label()
            ),
        ));
    }

    transition_status(
        state,
        number,
        StatusChange {
            status: OrderStatus::Cancelled,
            reason: Some(reason.unwrap_or_else(|| "Cancelled by user".to_string())),
            cancelled_by: Some(CancelActor::User),
        },
    )
    .await
}

/// Fire-and-forget purchaser notification
///
/// Runs on a detached task so a slow mail transport never blocks the HTTP
/// response; a missing address or a dispatch failure is logged and swallowed.
fn notify_status_change(state: &ServerState, order: &Order) {
    let Some(email) = order
        .billing
        .email
        .clone()
        .filter(|e| !e.is_empty())
    else {
        tracing::warn!(
            number = %order.number,
            "No purchaser email on file, skipping status notification"
        );
        return;
    };

    let mailer = state.mailer.clone();
    let number = order.number.clone();
    let label = order.order_status.label();

    tokio::spawn(async move {
        mailer.send_order_status(&email, &number, label).await;
    });
}
