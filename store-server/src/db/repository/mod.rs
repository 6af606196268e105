//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

// Accounts
pub mod user;

// Catalog
pub mod product;

// Shopping
pub mod cart;
pub mod wishlist;

// Orders
pub mod order;

// Reviews
pub mod review;

// Re-exports
pub use cart::CartRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use review::ReviewRepository;
pub use user::UserRepository;
pub use wishlist::WishlistRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 使用 surrealdb::RecordId 处理所有 ID：
//   - 解析: let id: RecordId = "product:abc".parse()?;
//   - 获取表名: id.table()
//   - CRUD: db.select(id) / db.delete(id) 直接使用 RecordId
//
// 嵌入对象内的记录引用 (order.items[*].product 等) 以字符串形式存储，
// 顶层引用字段 (order.user, cart.user) 以原生 record link 存储，
// 以便 `user.email` 这类字段遍历可用。

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
