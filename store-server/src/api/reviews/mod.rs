//! Review API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", review_routes())
}

fn review_routes() -> Router<ServerState> {
    // 全量列表与删除仅管理员；单品评价公开；发表评价需登录
    let admin = Router::new()
        .route("/", get(handler::list_all))
        .route("/{target}", delete(handler::delete_review))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", post(handler::create))
        .route("/{target}", get(handler::list_for_product))
        .merge(admin)
}
