//! Review API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;

use crate::api::MessageResponse;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate};
use crate::db::repository::{
    OrderRepository, ProductRepository, RepoError, ReviewRepository,
};
use crate::utils::validation::{MAX_TEXT_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::ErrorCode;

/// Review creation response
#[derive(Debug, Serialize)]
pub struct ReviewCreatedResponse {
    pub message: String,
    pub review: Review,
}

/// POST /api/reviews - 发表评价
///
/// 仅购买过该商品的用户可评价，且每人每商品一条。
/// 发表后重算商品的评分均值与评价数。
pub async fn create(
    State(state): State<ServerState>,
    current: CurrentUser,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<(StatusCode, Json<ReviewCreatedResponse>)> {
    validate_required_text(&payload.text, "text", MAX_TEXT_LEN)?;
    if !(1.0..=5.0).contains(&payload.rating) {
        return Err(AppError::validation("rating must be between 1 and 5"));
    }

    let user: surrealdb::RecordId = current
        .id
        .parse()
        .map_err(|_| AppError::invalid(format!("Invalid user id: {}", current.id)))?;

    let product_repo = ProductRepository::new(state.db.clone());
    let product = product_repo
        .resolve(&payload.product_number)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", payload.product_number),
            )
        })?;
    let product_id = product
        .id
        .clone()
        .ok_or_else(|| AppError::database("Product record without id"))?;

    // Only purchasers of the product may review it
    let order_repo = OrderRepository::new(state.db.clone());
    let has_ordered = order_repo
        .user_has_ordered_product(&user, &product_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if !has_ordered {
        return Err(AppError::new(ErrorCode::ReviewNotAllowed));
    }

    // One review per user per product
    let review_repo = ReviewRepository::new(state.db.clone());
    if review_repo
        .exists_for(&user, &product_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
    {
        return Err(AppError::new(ErrorCode::ReviewAlreadyExists));
    }

    let review = review_repo
        .create(
            product_id.clone(),
            product.name.clone(),
            user,
            current.name.clone(),
            payload.rating,
            payload.text,
        )
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Recompute the product's rating aggregate
    let ratings = review_repo
        .ratings_for_product(&product_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    let count = ratings.len() as i64;
    let average = if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    };
    product_repo
        .save_rating(&product_id, average, count)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    tracing::info!(
        product = %product.number,
        rating = payload.rating,
        average,
        count,
        "Review added"
    );

    Ok((
        StatusCode::CREATED,
        Json(ReviewCreatedResponse {
            message: "Review added successfully".to_string(),
            review,
        }),
    ))
}

/// GET /api/reviews/{product_number} - 某商品的评价 (公开，最新在前)
pub async fn list_for_product(
    State(state): State<ServerState>,
    Path(product_number): Path<String>,
) -> AppResult<Json<Vec<Review>>> {
    let product_repo = ProductRepository::new(state.db.clone());
    let product = product_repo
        .resolve(&product_number)
        .await
        .map_err(|e| AppError::database(e.to_string()))?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ProductNotFound,
                format!("Product {} not found", product_number),
            )
        })?;
    let product_id = product
        .id
        .ok_or_else(|| AppError::database("Product record without id"))?;

    let review_repo = ReviewRepository::new(state.db.clone());
    let reviews = review_repo
        .find_by_product(&product_id)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    Ok(Json(reviews))
}

/// GET /api/reviews - 全量评价 (admin，最新在前)
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    let review_repo = ReviewRepository::new(state.db.clone());
    let reviews = review_repo
        .find_all()
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    Ok(Json(reviews))
}

/// DELETE /api/reviews/{id} - 删除评价 (admin)
pub async fn delete_review(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = if id.contains(':') {
        id
    } else {
        format!("review:{}", id)
    };

    let review_repo = ReviewRepository::new(state.db.clone());
    review_repo.delete_by_id(&id).await.map_err(|e| match e {
        RepoError::NotFound(msg) => AppError::with_message(ErrorCode::ReviewNotFound, msg),
        RepoError::Validation(msg) => AppError::validation(msg),
        other => AppError::database(other.to_string()),
    })?;

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}
