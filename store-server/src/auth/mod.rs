//! 认证模块 - JWT 认证与权限
//!
//! - [`JwtService`] - 令牌生成与验证
//! - [`CurrentUser`] - 请求上下文中的用户身份
//! - [`require_auth`] / [`require_admin`] - 路由中间件

mod extractor;
mod jwt;
mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
