//! End-to-end API tests through the full router
//!
//! Exercises the auth middleware, admin guard and the cart/review/statistics
//! endpoints over HTTP against an in-memory database.

mod common;

use axum::Router;
use axum::body::Body;
use common::*;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use store_server::checkout::workflow;
use store_server::core::build_router;
use store_server::db::models::PaymentMethod;
use store_server::db::repository::UserRepository;

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn token_for(state: &store_server::ServerState, user: &store_server::CurrentUser) -> String {
    state
        .jwt_service
        .generate_token(&user.id, &user.name, &user.role)
        .unwrap()
}

fn admin_token(state: &store_server::ServerState) -> String {
    state
        .jwt_service
        .generate_token("user:admin", "boss", "admin")
        .unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let state = test_state().await;
    let app = build_router(state);

    let (status, body) = send(&app, "GET", "/api/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn signup_verify_signin_roundtrip() {
    let state = test_state().await;
    let app = build_router(state.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "jane",
            "email": "jane@example.com",
            "phone": "03001234567",
            "password": "hunter2!!"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Signin before verification is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/signin",
        None,
        Some(json!({ "username": "jane@example.com", "password": "hunter2!!" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Fetch the code straight from the store, as the mail transport is off
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_email("jane@example.com").await.unwrap().unwrap();
    let code = user.verification_code.unwrap();

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/verify",
        None,
        Some(json!({ "token": code })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/signin",
        None,
        Some(json!({ "username": "jane@example.com", "password": "hunter2!!" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    // The token opens protected routes
    let (status, body) = send(&app, "GET", "/api/cart", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn duplicate_signup_is_rejected() {
    let state = test_state().await;
    let app = build_router(state);

    let payload = json!({
        "name": "jane",
        "email": "jane@example.com",
        "phone": "03001234567",
        "password": "hunter2!!"
    });

    let (status, _) = send(&app, "POST", "/api/auth/signup", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/auth/signup", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email already exists");
}

#[tokio::test]
async fn protected_routes_require_token() {
    let state = test_state().await;
    let app = build_router(state);

    let (status, _) = send(&app, "GET", "/api/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/orders/user", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_routes_reject_plain_users() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let user_token = token_for(&state, &user);
    let admin_token = admin_token(&state);
    let app = build_router(state);

    let (status, _) = send(&app, "GET", "/api/orders", Some(&user_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/orders", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    // Catalog writes are admin-only too
    let (status, _) = send(
        &app,
        "POST",
        "/api/products",
        Some(&user_token),
        Some(json!({ "name": "X", "category": "c", "price": 1.0 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn catalog_browsing_is_public() {
    let state = test_state().await;
    seed_product(&state, "Plain tee", 10, vec![]).await;
    let app = build_router(state);

    let (status, body) = send(&app, "GET", "/api/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/api/products/1000", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Plain tee");

    let (status, _) = send(&app, "GET", "/api/products/9999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cart_add_merge_update_remove() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;
    let token = token_for(&state, &user);
    let app = build_router(state);

    // Add twice with the same variant → one merged line
    let add = json!({ "product_id": product.number, "quantity": 2 });
    let (status, _) = send(&app, "POST", "/api/cart", Some(&token), Some(add.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "POST", "/api/cart", Some(&token), Some(add)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 4);

    // Update the quantity down
    let (status, body) = send(
        &app,
        "PUT",
        "/api/cart/update",
        Some(&token),
        Some(json!({ "product_id": product.number, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"][0]["quantity"], 1);

    // Remove the line
    let (status, body) = send(
        &app,
        "DELETE",
        "/api/cart/remove",
        Some(&token),
        Some(json!({ "product_id": product.number })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"], json!([]));
}

#[tokio::test]
async fn cart_add_respects_stock() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 2, vec![]).await;
    let token = token_for(&state, &user);
    let app = build_router(state);

    let (status, _) = send(
        &app,
        "POST",
        "/api/cart",
        Some(&token),
        Some(json!({ "product_id": product.number, "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reviews_are_gated_by_purchase_and_uniqueness() {
    let state = test_state().await;
    let (buyer, _) = seed_user(&state, "jane", "jane@example.com").await;
    let (lurker, _) = seed_user(&state, "john", "john@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    workflow::place_order(
        &state,
        &buyer,
        place_request(vec![line_item(&product, None, 1)], PaymentMethod::Card),
    )
    .await
    .unwrap();

    let buyer_token = token_for(&state, &buyer);
    let lurker_token = token_for(&state, &lurker);
    let app = build_router(state.clone());

    let review = json!({ "product_number": product.number, "rating": 4.0, "text": "Fits well" });

    // Non-purchaser is rejected
    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&lurker_token),
        Some(review.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Purchaser succeeds once
    let (status, _) = send(
        &app,
        "POST",
        "/api/reviews",
        Some(&buyer_token),
        Some(review.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "POST", "/api/reviews", Some(&buyer_token), Some(review)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rating aggregate landed on the product
    let (_, body) = send(
        &app,
        "GET",
        &format!("/api/products/{}", product.number),
        None,
        None,
    )
    .await;
    assert_eq!(body["ratings"], 4.0);
    assert_eq!(body["reviews_count"], 1);

    // Product review listing is public, newest first
    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/reviews/{}", product.number),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn revenue_buckets_this_week_by_day() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 50, vec![]).await;

    // Two orders now (final_total = 25 + 5 shipping each)
    for _ in 0..2 {
        workflow::place_order(
            &state,
            &user,
            place_request(vec![line_item(&product, None, 1)], PaymentMethod::Card),
        )
        .await
        .unwrap();
    }

    // One order well before this week must not be counted
    state
        .db
        .query("CREATE order SET number = '0001', created_at = 0, final_total = 999.0")
        .await
        .unwrap()
        .check()
        .unwrap();

    let admin_token = admin_token(&state);
    let app = build_router(state);

    let (status, body) = send(&app, "GET", "/api/orders/revenue", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert_eq!(entries[0]["day"], "Mon");
    assert_eq!(entries[6]["day"], "Sun");

    let week_total: f64 = entries
        .iter()
        .map(|e| e["value"].as_f64().unwrap())
        .sum();
    assert_eq!(week_total, 60.0);
}

#[tokio::test]
async fn summary_reports_totals() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 50, vec![]).await;

    workflow::place_order(
        &state,
        &user,
        place_request(vec![line_item(&product, None, 2)], PaymentMethod::Card),
    )
    .await
    .unwrap();

    let admin_token = admin_token(&state);
    let app = build_router(state);

    let (status, body) = send(&app, "GET", "/api/orders/summary", Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalOrders"], 1);
    assert_eq!(body["totalProducts"], 1);
    assert_eq!(body["totalRevenue"], 55.0);
    assert_eq!(body["totalSales"], 55.0);
}

#[tokio::test]
async fn owner_cancels_via_http() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    let order = workflow::place_order(
        &state,
        &user,
        place_request(
            vec![line_item(&product, None, 1)],
            PaymentMethod::CashOnDelivery,
        ),
    )
    .await
    .unwrap();

    let token = token_for(&state, &user);
    let app = build_router(state);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{}/cancel", order.number),
        Some(&token),
        Some(json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["order_status"], "cancelled");
    assert_eq!(body["cancelled_by"], "user");
}
