//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录/档案接口
//! - [`products`] - 商品目录接口
//! - [`reviews`] - 商品评价接口
//! - [`cart`] - 购物车接口
//! - [`wishlist`] - 心愿单接口
//! - [`orders`] - 订单接口
//! - [`payment`] - 支付意向接口

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod payment;
pub mod products;
pub mod reviews;
pub mod wishlist;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};

use serde::Serialize;

/// Simple `{ message }` response body used by several endpoints
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
