//! Wishlist Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Wishlist;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct WishlistRepository {
    base: BaseRepository,
}

impl WishlistRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the wishlist owned by a user
    pub async fn find_by_user(&self, user: &RecordId) -> RepoResult<Option<Wishlist>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM wishlist WHERE user = $user LIMIT 1")
            .bind(("user", user.clone()))
            .await?;
        let lists: Vec<Wishlist> = result.take(0)?;
        Ok(lists.into_iter().next())
    }

    /// Add a product to the wishlist (idempotent), creating the list if missing
    pub async fn add(&self, user: &RecordId, product: &RecordId) -> RepoResult<Wishlist> {
        // `+=` on a set-like array: SurrealDB appends, so guard duplicates first
        if let Some(existing) = self.find_by_user(user).await? {
            if existing.products.contains(product) {
                return Ok(existing);
            }
            let mut result = self
                .base
                .db()
                .query(
                    "UPDATE wishlist SET products += $product WHERE user = $user RETURN AFTER",
                )
                .bind(("product", product.clone()))
                .bind(("user", user.clone()))
                .await?;
            let lists: Vec<Wishlist> = result.take(0)?;
            return lists
                .into_iter()
                .next()
                .ok_or_else(|| RepoError::Database("Failed to update wishlist".to_string()));
        }

        let mut result = self
            .base
            .db()
            .query("CREATE wishlist SET user = $user, products = [$product] RETURN AFTER")
            .bind(("user", user.clone()))
            .bind(("product", product.clone()))
            .await?;

        result
            .take::<Option<Wishlist>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create wishlist".to_string()))
    }

    /// Remove a product from the wishlist (no-op when absent)
    pub async fn remove(&self, user: &RecordId, product: &RecordId) -> RepoResult<Option<Wishlist>> {
        let mut result = self
            .base
            .db()
            .query("UPDATE wishlist SET products -= $product WHERE user = $user RETURN AFTER")
            .bind(("product", product.clone()))
            .bind(("user", user.clone()))
            .await?;
        let lists: Vec<Wishlist> = result.take(0)?;
        Ok(lists.into_iter().next())
    }
}
