//! Product API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::MessageResponse;
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductRatingSummary, ProductUpdate};
use crate::db::repository::{ProductRepository, RepoError};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;

/// Top-rated listing size
const TOP_RATED_LIMIT: i64 = 10;

fn not_found(number: &str) -> AppError {
    AppError::with_message(
        ErrorCode::ProductNotFound,
        format!("Product {} not found", number),
    )
}

/// GET /api/products - 获取所有商品
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo
        .find_all()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(products))
}

/// GET /api/products/top-rated - 评分最高的商品 (dashboard)
pub async fn top_rated(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<ProductRatingSummary>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo
        .find_top_rated(TOP_RATED_LIMIT)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(products))
}

/// GET /api/products/{number} - 获取单个商品
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_number(&number)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| not_found(&number))?;
    Ok(Json(product))
}

/// POST /api/products - 新建商品 (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    if !payload.price.is_finite() || payload.price < 0.0 {
        return Err(AppError::validation("price must be a non-negative number"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .create(payload)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(number = %product.number, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{number} - 更新商品 (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(number): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price
        && (!price.is_finite() || price < 0.0)
    {
        return Err(AppError::validation("price must be a non-negative number"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .update_by_number(&number, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => not_found(&number),
            other => AppError::database(other.to_string()),
        })?;

    Ok(Json(product))
}

/// DELETE /api/products/{number} - 删除商品 (admin)
pub async fn delete(
    State(state): State<ServerState>,
    Path(number): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete_by_number(&number).await.map_err(|e| match e {
        RepoError::NotFound(_) => not_found(&number),
        other => AppError::database(other.to_string()),
    })?;

    tracing::info!(number = %number, "Product deleted");

    Ok(Json(MessageResponse::new("Product deleted")))
}
