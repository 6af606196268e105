//! Cart API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", cart_routes())
}

fn cart_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_cart).post(handler::add_item))
        .route("/update", put(handler::update_item))
        .route("/remove", delete(handler::remove_item))
}
