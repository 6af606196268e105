//! Review Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::Review;
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Has this user already reviewed the product?
    pub async fn exists_for(&self, user: &RecordId, product: &RecordId) -> RepoResult<bool> {
        let mut result = self
            .base
            .db()
            .query(
                "SELECT VALUE created_at FROM review \
                 WHERE user = $user AND product = $product LIMIT 1",
            )
            .bind(("user", user.clone()))
            .bind(("product", product.clone()))
            .await?;
        let found: Vec<i64> = result.take(0)?;
        Ok(!found.is_empty())
    }

    /// Create a review
    pub async fn create(
        &self,
        product: RecordId,
        product_name: String,
        user: RecordId,
        user_name: String,
        rating: f64,
        text: String,
    ) -> RepoResult<Review> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE review SET
                    product = $product,
                    product_name = $product_name,
                    user = $user,
                    user_name = $user_name,
                    rating = $rating,
                    text = $text,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("product", product))
            .bind(("product_name", product_name))
            .bind(("user", user))
            .bind(("user_name", user_name))
            .bind(("rating", rating))
            .bind(("text", text))
            .bind(("created_at", time::now_millis()))
            .await?;

        result
            .take::<Option<Review>>(0)?
            .ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Reviews for one product, newest first
    pub async fn find_by_product(&self, product: &RecordId) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review WHERE product = $product ORDER BY created_at DESC")
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// All reviews, newest first (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// All ratings for one product (average recomputation)
    pub async fn ratings_for_product(&self, product: &RecordId) -> RepoResult<Vec<f64>> {
        let ratings: Vec<f64> = self
            .base
            .db()
            .query("SELECT VALUE rating FROM review WHERE product = $product")
            .bind(("product", product.clone()))
            .await?
            .take(0)?;
        Ok(ratings)
    }

    /// Hard delete a review by id ("review:xxx")
    pub async fn delete_by_id(&self, id: &str) -> RepoResult<()> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;

        let deleted: Option<Review> = self.base.db().delete(thing).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Review {} not found", id)));
        }
        Ok(())
    }
}
