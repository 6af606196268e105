//! Cart API Handlers

use axum::{
    Json,
    extract::State,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Cart, CartAddItem, CartItem, CartRemoveItem, CartUpdateItem, Product};
use crate::db::repository::{CartRepository, ProductRepository};
use crate::utils::{AppError, AppResult, time};
use shared::ErrorCode;
use surrealdb::RecordId;

fn parse_user(current: &CurrentUser) -> AppResult<RecordId> {
    current
        .id
        .parse()
        .map_err(|_| AppError::invalid(format!("Invalid user id: {}", current.id)))
}

async fn resolve_product(state: &ServerState, reference: &str) -> AppResult<Product> {
    let repo = ProductRepository::new(state.db.clone());
    repo.resolve(reference)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", reference),
            )
        })
}

/// GET /api/cart - 当前用户的购物车
///
/// 不存在时返回空占位，不落库。
pub async fn get_cart(
    State(state): State<ServerState>,
    current: CurrentUser,
) -> AppResult<Json<Cart>> {
    let user = parse_user(&current)?;
    let repo = CartRepository::new(state.db.clone());

    let cart = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .unwrap_or_else(|| Cart {
            id: None,
            user,
            items: Vec::new(),
            updated_at: time::now_millis(),
        });

    Ok(Json(cart))
}

/// POST /api/cart - 加入商品
///
/// 同商品同规格 (size+color) 的行合并数量。
pub async fn add_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CartAddItem>,
) -> AppResult<Json<Cart>> {
    if payload.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }

    let user = parse_user(&current)?;
    let product = resolve_product(&state, &payload.product_id).await?;

    if product.stock < payload.quantity {
        return Err(AppError::new(ErrorCode::InsufficientStock));
    }

    let product_id = product
        .id
        .clone()
        .ok_or_else(|| AppError::database("Product record without id"))?;

    let repo = CartRepository::new(state.db.clone());
    let mut items = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .map(|c| c.items)
        .unwrap_or_default();

    if let Some(existing) = items.iter_mut().find(|item| {
        item.matches(
            &product_id,
            payload.size.as_deref(),
            payload.color.as_deref(),
        )
    }) {
        existing.quantity += payload.quantity;
    } else {
        items.push(CartItem {
            product: product_id,
            name: product.name.clone(),
            image: product.image_url.clone(),
            price: product.price,
            size: payload.size,
            color: payload.color,
            quantity: payload.quantity,
        });
    }

    let cart = repo
        .save_items(&user, items)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(cart))
}

/// PUT /api/cart/update - 修改行数量
pub async fn update_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CartUpdateItem>,
) -> AppResult<Json<Cart>> {
    if payload.quantity < 1 {
        return Err(AppError::validation("quantity must be at least 1"));
    }

    let user = parse_user(&current)?;
    let repo = CartRepository::new(state.db.clone());

    let cart = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::CartNotFound))?;

    let product = resolve_product(&state, &payload.product_id).await?;
    let product_id = product
        .id
        .clone()
        .ok_or_else(|| AppError::database("Product record without id"))?;

    let mut items = cart.items;
    let item = items
        .iter_mut()
        .find(|item| {
            item.matches(
                &product_id,
                payload.size.as_deref(),
                payload.color.as_deref(),
            )
        })
        .ok_or_else(|| AppError::new(ErrorCode::CartItemNotFound))?;

    // Stock check against the increase only
    let diff = payload.quantity - item.quantity;
    if product.stock < diff {
        return Err(AppError::new(ErrorCode::InsufficientStock));
    }
    item.quantity = payload.quantity;

    let cart = repo
        .save_items(&user, items)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(cart))
}

/// DELETE /api/cart/remove - 移除一行
pub async fn remove_item(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<CartRemoveItem>,
) -> AppResult<Json<Cart>> {
    let user = parse_user(&current)?;
    let repo = CartRepository::new(state.db.clone());

    let cart = repo
        .find_by_user(&user)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| AppError::new(ErrorCode::CartNotFound))?;

    let product = resolve_product(&state, &payload.product_id).await?;
    let product_id = product
        .id
        .clone()
        .ok_or_else(|| AppError::database("Product record without id"))?;

    let mut items = cart.items;
    let index = items
        .iter()
        .position(|item| {
            item.matches(
                &product_id,
                payload.size.as_deref(),
                payload.color.as_deref(),
            )
        })
        .ok_or_else(|| AppError::new(ErrorCode::CartItemNotFound))?;
    items.remove(index);

    let cart = repo
        .save_items(&user, items)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(cart))
}
