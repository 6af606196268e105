//! Wishlist API Handlers

use axum::{Json, extract::State};
use surrealdb::RecordId;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::WishlistEntry;
use crate::db::repository::{ProductRepository, WishlistRepository};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;

fn parse_user(current: &CurrentUser) -> AppResult<RecordId> {
    current
        .id
        .parse()
        .map_err(|_| AppError::invalid(format!("Invalid user id: {}", current.id)))
}

async fn resolve_product_id(state: &ServerState, reference: &str) -> AppResult<RecordId> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .resolve(reference)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", reference),
            )
        })?;
    product
        .id
        .ok_or_else(|| AppError::database("Product record without id"))
}

fn product_strings(products: &[RecordId]) -> Vec<String> {
    products.iter().map(|p| p.to_string()).collect()
}

/// GET /api/wishlist - 当前用户的心愿单 (商品 id 列表)
pub async fn get_wishlist(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Vec<String>>> {
    let user = parse_user(&current)?;
    let repo = WishlistRepository::new(state.db.clone());

    let products = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .map(|w| product_strings(&w.products))
        .unwrap_or_default();

    Ok(Json(products))
}

/// POST /api/wishlist/add - 加入商品 (幂等)
pub async fn add_product(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<WishlistEntry>,
) -> AppResult<Json<Vec<String>>> {
    let user = parse_user(&current)?;
    let product = resolve_product_id(&state, &payload.product_id).await?;

    let repo = WishlistRepository::new(state.db.clone());
    let wishlist = repo
        .add(&user, &product)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(product_strings(&wishlist.products)))
}

/// POST /api/wishlist/remove - 移除商品 (缺失时为空操作)
pub async fn remove_product(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<WishlistEntry>,
) -> AppResult<Json<Vec<String>>> {
    let user = parse_user(&current)?;
    let product = resolve_product_id(&state, &payload.product_id).await?;

    let repo = WishlistRepository::new(state.db.clone());
    let products = repo
        .remove(&user, &product)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .map(|w| product_strings(&w.products))
        .unwrap_or_default();

    Ok(Json(products))
}
