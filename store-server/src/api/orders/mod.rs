//! Order API 模块
//!
//! 下单与订单生命周期接口；核心编排在 [`crate::checkout::workflow`]。

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    // 管理端：全量列表、状态流转、营收统计
    let admin = Router::new()
        .route("/", get(handler::list_all))
        .route("/revenue", get(handler::revenue))
        .route("/summary", get(handler::summary))
        .route("/{number}/status", put(handler::update_status))
        .route_layer(middleware::from_fn(require_admin));

    // 用户端：下单、自己的订单、自助取消
    Router::new()
        .route("/", post(handler::place))
        .route("/user", get(handler::user_orders))
        .route("/{number}/cancel", put(handler::cancel))
        .merge(admin)
}
