//! Product API 模块

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", product_routes())
}

fn product_routes() -> Router<ServerState> {
    // 目录浏览公开；变更仅管理员
    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/{number}", put(handler::update).delete(handler::delete))
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/", get(handler::list))
        .route("/top-rated", get(handler::top_rated))
        .route("/{number}", get(handler::get_by_number))
        .merge(admin)
}
