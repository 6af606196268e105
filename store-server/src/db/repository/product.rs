//! Product Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{
    ColorStock, Product, ProductCreate, ProductRatingSummary, ProductUpdate, StockStatus,
};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const PRODUCT_TABLE: &str = "product";

/// First product number handed out by the sequential allocator
const FIRST_PRODUCT_NUMBER: u32 = 1000;

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY number")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Top rated products for the dashboard (trimmed projection)
    pub async fn find_top_rated(&self, limit: i64) -> RepoResult<Vec<ProductRatingSummary>> {
        let products: Vec<ProductRatingSummary> = self
            .base
            .db()
            .query(
                "SELECT number, name, ratings, status, price, image_url \
                 FROM product ORDER BY ratings DESC LIMIT $limit",
            )
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by human-facing number
    pub async fn find_by_number(&self, number: &str) -> RepoResult<Option<Product>> {
        let number_owned = number.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product WHERE number = $number LIMIT 1")
            .bind(("number", number_owned))
            .await?;
        let products: Vec<Product> = result.take(0)?;
        Ok(products.into_iter().next())
    }

    /// Find product by record id
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Product>> {
        let product: Option<Product> = self.base.db().select(id.clone()).await?;
        Ok(product)
    }

    /// Resolve a client-supplied product reference
    ///
    /// Accepts either a record id ("product:xxx") or the human-facing number.
    pub async fn resolve(&self, reference: &str) -> RepoResult<Option<Product>> {
        if let Ok(id) = reference.parse::<RecordId>()
            && id.table() == PRODUCT_TABLE
        {
            return self.find_by_id(&id).await;
        }
        self.find_by_number(reference).await
    }

    /// Count all products
    pub async fn count(&self) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE count() FROM product GROUP ALL")
            .await?;
        let counts: Vec<i64> = result.take(0)?;
        Ok(counts.into_iter().next().unwrap_or(0))
    }

    /// Allocate the next sequential 4-digit product number
    ///
    /// max existing + 1, starting at "1000"
    async fn next_number(&self) -> RepoResult<String> {
        let mut result = self
            .base
            .db()
            .query("SELECT VALUE number FROM product ORDER BY number DESC LIMIT 1")
            .await?;
        let numbers: Vec<String> = result.take(0)?;

        let next = numbers
            .first()
            .and_then(|n| n.parse::<u32>().ok())
            .map(|n| n + 1)
            .unwrap_or(FIRST_PRODUCT_NUMBER);
        Ok(format!("{:04}", next))
    }

    /// Create a new product with derived status
    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        let number = self.next_number().await?;

        // Aggregate stock follows the color breakdown when one is given
        let stock = if data.colors.is_empty() {
            data.stock
        } else {
            data.colors.iter().map(|c| c.stock).sum()
        };

        let product = Product {
            id: None,
            number,
            name: data.name,
            category: data.category,
            price: data.price,
            discounted_price: data.discounted_price,
            short_description: data.short_description,
            description: data.description,
            image_url: data.image_url,
            images: data.images,
            stock,
            colors: data.colors,
            status: StockStatus::from_stock(stock),
            ratings: 0.0,
            reviews_count: 0,
        };

        let created: Option<Product> = self
            .base
            .db()
            .create(PRODUCT_TABLE)
            .content(product)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    /// Update a product by number
    ///
    /// Only the supplied fields change; status is re-derived whenever the
    /// update touches stock or colors.
    pub async fn update_by_number(&self, number: &str, data: ProductUpdate) -> RepoResult<Product> {
        let existing = self
            .find_by_number(number)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", number)))?;

        let thing = existing
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Product record without id".to_string()))?;

        let colors = data.colors.unwrap_or(existing.colors);
        let stock = if colors.is_empty() {
            data.stock.unwrap_or(existing.stock)
        } else {
            colors.iter().map(|c| c.stock).sum()
        };
        let status = StockStatus::from_stock(stock);

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    category = $category OR category,
                    price = $price OR price,
                    discounted_price = $discounted_price OR discounted_price,
                    short_description = $short_description OR short_description,
                    description = $description OR description,
                    image_url = $image_url OR image_url,
                    images = $images OR images,
                    stock = $stock,
                    colors = $colors,
                    status = $status
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name))
            .bind(("category", data.category))
            .bind(("price", data.price))
            .bind(("discounted_price", data.discounted_price))
            .bind(("short_description", data.short_description))
            .bind(("description", data.description))
            .bind(("image_url", data.image_url))
            .bind(("images", data.images))
            .bind(("stock", stock))
            .bind(("colors", colors))
            .bind(("status", status))
            .await?;

        result
            .take::<Option<Product>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", number)))
    }

    /// Persist adjusted stock fields (inventory adjuster output)
    pub async fn save_stock(
        &self,
        id: &RecordId,
        stock: i64,
        colors: Vec<ColorStock>,
        status: StockStatus,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET stock = $stock, colors = $colors, status = $status")
            .bind(("thing", id.clone()))
            .bind(("stock", stock))
            .bind(("colors", colors))
            .bind(("status", status))
            .await?;
        Ok(())
    }

    /// Persist recomputed rating aggregate (review flow)
    pub async fn save_rating(
        &self,
        id: &RecordId,
        ratings: f64,
        reviews_count: i64,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $thing SET ratings = $ratings, reviews_count = $reviews_count")
            .bind(("thing", id.clone()))
            .bind(("ratings", ratings))
            .bind(("reviews_count", reviews_count))
            .await?;
        Ok(())
    }

    /// Hard delete a product by number
    pub async fn delete_by_number(&self, number: &str) -> RepoResult<()> {
        let existing = self
            .find_by_number(number)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", number)))?;

        let thing = existing
            .id
            .ok_or_else(|| RepoError::Database("Product record without id".to_string()))?;
        let _: Option<Product> = self.base.db().delete(thing).await?;
        Ok(())
    }
}
