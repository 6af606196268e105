//! Database Module
//!
//! Embedded SurrealDB connection and schema setup

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open a RocksDB-backed database at the given path
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        tracing::info!(path = %db_path, "Database opened (SurrealDB/RocksDB)");
        Self::setup(db).await
    }

    /// Open an in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::setup(db).await
    }

    async fn setup(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns("store")
            .use_db("store")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        Ok(Self { db })
    }
}

/// Unique constraints the data model relies on
///
/// 其余字段保持 schemaless，由 model 层约束。
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS user_email_unique ON TABLE user FIELDS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS cart_user_unique ON TABLE cart FIELDS user UNIQUE;
        DEFINE INDEX IF NOT EXISTS wishlist_user_unique ON TABLE wishlist FIELDS user UNIQUE;
        DEFINE INDEX IF NOT EXISTS product_number_unique ON TABLE product FIELDS number UNIQUE;
        DEFINE INDEX IF NOT EXISTS order_number_unique ON TABLE order FIELDS number UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

    tracing::info!("Database schema (unique indexes) applied");
    Ok(())
}
