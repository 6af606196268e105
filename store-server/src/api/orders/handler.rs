//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use serde::Serialize;
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::checkout::workflow::{self, StatusChange};
use crate::core::ServerState;
use crate::db::models::{
    CancelRequest, Order, OrderWithPurchaser, PlaceOrderRequest, StatusUpdateRequest,
};
use crate::db::repository::{OrderRepository, ProductRepository};
use crate::utils::time::{WEEKDAY_LABELS, start_of_week_millis, weekday_index};
use crate::utils::{AppError, AppResult};

/// POST /api/orders - 下单
pub async fn place(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<PlaceOrderRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = workflow::place_order(&state, &current, payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 全量订单，含买家邮箱 (admin)
pub async fn list_all(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<OrderWithPurchaser>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_all_with_purchaser()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(orders))
}

/// GET /api/orders/user - 当前用户的订单，最新在前
pub async fn user_orders(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let user: RecordId = current
        .id
        .parse()
        .map_err(|_| AppError::invalid(format!("Invalid user id: {}", current.id)))?;

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(orders))
}

/// PUT /api/orders/{number}/status - 状态流转 (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(number): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let order = workflow::transition_status(
        &state,
        &number,
        StatusChange {
            status: payload.status,
            reason: payload.reason,
            cancelled_by: payload.cancelled_by,
        },
    )
    .await?;
    Ok(Json(order))
}

/// PUT /api/orders/{number}/cancel - 买家自助取消
pub async fn cancel(
    State(state): State<ServerState>,
    current: CurrentUser,
    Path(number): Path<String>,
    Json(payload): Json<CancelRequest>,
) -> AppResult<Json<Order>> {
    let order = workflow::cancel_own_order(&state, &current, &number, payload.reason).await?;
    Ok(Json(order))
}

// =============================================================================
// Aggregations (admin dashboard)
// =============================================================================

/// One revenue bucket
#[derive(Debug, Serialize)]
pub struct RevenueEntry {
    pub day: &'static str,
    pub value: f64,
}

/// GET /api/orders/revenue - 本周 (周一起) 每日营收 (admin)
pub async fn revenue(State(state): State<ServerState>) -> AppResult<Json<Vec<RevenueEntry>>> {
    let start = start_of_week_millis(Utc::now());

    let repo = OrderRepository::new(state.db.clone());
    let rows = repo
        .revenue_rows_since(start)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    let mut buckets = [0.0f64; 7];
    for row in rows {
        buckets[weekday_index(row.created_at)] += row.final_total;
    }

    let entries = WEEKDAY_LABELS
        .into_iter()
        .zip(buckets)
        .map(|(day, value)| RevenueEntry { day, value })
        .collect();

    Ok(Json(entries))
}

/// Dashboard summary
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    #[serde(rename = "totalOrders")]
    pub total_orders: i64,
    #[serde(rename = "totalSales")]
    pub total_sales: f64,
    #[serde(rename = "totalProducts")]
    pub total_products: i64,
    #[serde(rename = "totalRevenue")]
    pub total_revenue: f64,
}

/// GET /api/orders/summary - 总览 (admin)
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<SummaryResponse>> {
    let order_repo = OrderRepository::new(state.db.clone());
    let product_repo = ProductRepository::new(state.db.clone());

    let total_orders = order_repo
        .count()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let total_revenue: f64 = order_repo
        .final_totals()
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .iter()
        .sum();
    let total_products = product_repo
        .count()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(SummaryResponse {
        total_orders,
        total_sales: total_revenue,
        total_products,
        total_revenue,
    }))
}
