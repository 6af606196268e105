//! Shared helpers for integration tests
//!
//! All tests run against an in-memory SurrealDB with mail disabled.

#![allow(dead_code)]

use surrealdb::RecordId;

use store_server::auth::CurrentUser;
use store_server::core::{Config, ServerState};
use store_server::db::models::{
    BillingDetails, ColorStock, OrderItem, PaymentMethod, PlaceOrderRequest, Product,
    ProductCreate, ShippingDetails,
};
use store_server::db::repository::{ProductRepository, UserRepository};

/// Fresh server state on an in-memory database, mail transport disabled
pub async fn test_state() -> ServerState {
    let mut config = Config::with_overrides("/tmp/store-server-test", 0);
    config.mail_api_url = String::new();
    ServerState::initialize_in_memory(&config).await
}

/// Create a verified user and its request identity
pub async fn seed_user(state: &ServerState, name: &str, email: &str) -> (CurrentUser, RecordId) {
    let repo = UserRepository::new(state.db.clone());
    let hash = store_server::db::models::User::hash_password("secret-password").unwrap();
    let user = repo
        .create(
            name.to_string(),
            email.to_string(),
            "03001234567".to_string(),
            hash,
            "1234".to_string(),
            i64::MAX,
        )
        .await
        .expect("seed user");

    let id = user.id.expect("seeded user has id");
    let current = CurrentUser {
        id: id.to_string(),
        name: name.to_string(),
        role: "user".to_string(),
    };
    (current, id)
}

/// Create a catalog product
pub async fn seed_product(
    state: &ServerState,
    name: &str,
    stock: i64,
    colors: Vec<ColorStock>,
) -> Product {
    let repo = ProductRepository::new(state.db.clone());
    repo.create(ProductCreate {
        name: name.to_string(),
        category: "shirts".to_string(),
        price: 25.0,
        discounted_price: None,
        short_description: None,
        description: None,
        image_url: None,
        images: Vec::new(),
        stock,
        colors,
    })
    .await
    .expect("seed product")
}

pub fn color(name: &str, stock: i64) -> ColorStock {
    ColorStock {
        color: name.to_string(),
        stock,
    }
}

/// Line item referencing a seeded product
pub fn line_item(product: &Product, color: Option<&str>, quantity: i64) -> OrderItem {
    OrderItem {
        product: product.id.clone().expect("product id"),
        name: product.name.clone(),
        image: None,
        color: color.map(|c| c.to_string()),
        size: None,
        price: product.price,
        quantity,
    }
}

/// Placement request with a billing email on file
pub fn place_request(items: Vec<OrderItem>, payment_method: PaymentMethod) -> PlaceOrderRequest {
    let total: f64 = items.iter().map(|i| i.price * i.quantity as f64).sum();
    PlaceOrderRequest {
        items,
        billing: BillingDetails {
            first_name: Some("Jane".to_string()),
            email: Some("jane@example.com".to_string()),
            ..Default::default()
        },
        shipping: ShippingDetails::default(),
        payment_method,
        payment_status: None,
        total,
        shipping_cost: 5.0,
        final_total: total + 5.0,
        stripe_payment_id: None,
        total_pkr: None,
        total_usd: None,
        final_total_pkr: None,
        final_total_usd: None,
    }
}
