//! Wishlist API 模块

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wishlist", wishlist_routes())
}

fn wishlist_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_wishlist))
        .route("/add", post(handler::add_product))
        .route("/remove", post(handler::remove_product))
}
