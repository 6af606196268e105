//! Auth API 模块
//!
//! 注册、邮箱验证、登录、找回密码、用户档案。

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", auth_routes())
}

fn auth_routes() -> Router<ServerState> {
    Router::new()
        // 公共路由 (认证中间件跳过)
        .route("/signup", post(handler::signup))
        .route("/verify", post(handler::verify))
        .route("/signin", post(handler::signin))
        .route("/forgot-password", post(handler::forgot_password))
        .route("/reset-password", post(handler::reset_password))
        // 档案: GET 公开，修改需要登录
        .route(
            "/profile/{id}",
            get(handler::get_profile).put(handler::update_profile),
        )
        .route("/change-password/{id}", patch(handler::change_password))
}
