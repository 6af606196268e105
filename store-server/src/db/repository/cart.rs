//! Cart Repository
//!
//! One cart per user (unique index). The cart is created lazily on first
//! write and emptied, never deleted, when an order is placed.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Cart, CartItem};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct CartRepository {
    base: BaseRepository,
}

impl CartRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the cart owned by a user
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Option<Cart>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM cart WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let carts: Vec<Cart> = result.take(0)?;
        Ok(carts.into_iter().next())
    }

    /// Replace the items of a user's cart, creating the cart if missing
    pub async fn save_items(&self, user: &RecordId, items: Vec<CartItem>) -> RepoResult<Cart> {
        let now = time::now_millis();

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE cart SET items = $items, updated_at = $now
                   WHERE user = $user RETURN AFTER"#,
            )
            .bind(("items", items.clone()))
            .bind(("now", now))
            .bind(("user", user.clone()))
            .await?;
        let updated: Vec<Cart> = result.take(0)?;

        if let Some(cart) = updated.into_iter().next() {
            return Ok(cart);
        }

        // No cart yet — create one
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE cart SET user = $user, items = $items, updated_at = $now
                   RETURN AFTER"#,
            )
            .bind(("user", user.clone()))
            .bind(("items", items))
            .bind(("now", now))
            .await?;

        result
            .take::<Option<Cart>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create cart".to_string()))
    }

    /// Empty the user's cart (create-empty when none exists)
    pub async fn clear(&self, user: &RecordId) -> RepoResult<Cart> {
        self.save_items(user, Vec::new()).await
    }
}
