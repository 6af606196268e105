//! Order placement workflow tests
//!
//! Covers status derivation, cart clearing, stock decrement (variant and
//! plain), partial application on missing products, precondition failures
//! and number-allocation exhaustion.

mod common;

use common::*;
use shared::ErrorCode;
use store_server::checkout::workflow;
use store_server::db::models::{
    CartItem, OrderStatus, PaymentMethod, PaymentStatus, StockStatus,
};
use store_server::db::repository::{CartRepository, OrderRepository, ProductRepository};

#[tokio::test]
async fn card_placement_is_accepted_and_clears_cart() {
    let state = test_state().await;
    let (user, user_id) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    // Pre-fill the cart so clearing is observable
    let cart_repo = CartRepository::new(state.db.clone());
    cart_repo
        .save_items(
            &user_id,
            vec![CartItem {
                product: product.id.clone().unwrap(),
                name: product.name.clone(),
                image: None,
                price: product.price,
                size: None,
                color: None,
                quantity: 2,
            }],
        )
        .await
        .unwrap();

    let order = workflow::place_order(
        &state,
        &user,
        place_request(vec![line_item(&product, None, 2)], PaymentMethod::Card),
    )
    .await
    .unwrap();

    assert_eq!(order.order_status, OrderStatus::Accepted);
    assert_eq!(order.payment_status, PaymentStatus::Pending);
    assert_eq!(order.number.len(), 4);
    assert_eq!(order.user_name, "jane");

    // History seeded with the initial status
    assert_eq!(order.status_history.len(), 1);
    assert_eq!(order.status_history[0].status, OrderStatus::Accepted);

    // Cart is empty afterwards, regardless of prior contents
    let cart = cart_repo.find_by_user(&user_id).await.unwrap().unwrap();
    assert!(cart.items.is_empty());
}

#[tokio::test]
async fn cod_placement_stays_pending() {
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

    assert_eq!(order.order_status, OrderStatus::Pending);
}

#[tokio::test]
async fn variant_stock_decrement_scenario() {
    // {red:5, blue:3}, order 2 red → red=3, blue=3, aggregate=6
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(
        &state,
        "Color tee",
        0,
        vec![color("red", 5), color("blue", 3)],
    )
    .await;
    assert_eq!(product.stock, 8); // aggregate derived from colors at creation

    workflow::place_order(
        &state,
        &user,
        place_request(vec![line_item(&product, Some("red"), 2)], PaymentMethod::Card),
    )
    .await
    .unwrap();

    let repo = ProductRepository::new(state.db.clone());
    let updated = repo
        .find_by_number(&product.number)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.colors, vec![color("red", 3), color("blue", 3)]);
    assert_eq!(updated.stock, 6);
    assert_eq!(updated.status, StockStatus::InStock);
}

#[tokio::test]
async fn plain_stock_decrement_is_clamped_at_zero() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 3, vec![]).await;

    workflow::place_order(
        &state,
        &user,
        place_request(vec![line_item(&product, None, 7)], PaymentMethod::Card),
    )
    .await
    .unwrap();

    let repo = ProductRepository::new(state.db.clone());
    let updated = repo
        .find_by_number(&product.number)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.stock, 0);
    assert_eq!(updated.status, StockStatus::OutOfStock);
}

#[tokio::test]
async fn missing_product_is_skipped_without_failing_placement() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    let mut ghost = line_item(&product, None, 1);
    ghost.product = "product:does_not_exist".parse().unwrap();
    ghost.name = "Ghost".to_string();

    let order = workflow::place_order(
        &state,
        &user,
        place_request(
            vec![ghost, line_item(&product, None, 4)],
            PaymentMethod::Card,
        ),
    )
    .await
    .unwrap();

    // Placement succeeded with both lines recorded
    assert_eq!(order.items.len(), 2);

    // The real product still got decremented
    let repo = ProductRepository::new(state.db.clone());
    let updated = repo
        .find_by_number(&product.number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.stock, 6);
}

#[tokio::test]
async fn empty_items_are_rejected() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;

    let err = workflow::place_order(
        &state,
        &user,
        place_request(vec![], PaymentMethod::Card),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::OrderEmpty);
}

#[tokio::test]
async fn billing_without_contact_is_rejected() {
    let state = test_state().await;
    let (user, _) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    let mut request = place_request(vec![line_item(&product, None, 1)], PaymentMethod::Card);
    request.billing.email = None;
    request.billing.phone = None;

    let err = workflow::place_order(&state, &user, request).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::MissingBillingContact);
}

#[tokio::test]
async fn number_exhaustion_aborts_with_no_side_effects() {
    let state = test_state().await;
    let (user, user_id) = seed_user(&state, "jane", "jane@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;

    // Saturate the whole 1000..=9999 number space so every candidate collides
    state
        .db
        .query(
            "FOR $i IN 1000..10000 { \
                CREATE order SET number = <string>$i, created_at = 0, final_total = 0.0; \
             }",
        )
        .await
        .unwrap()
        .check()
        .unwrap();

    // Cart has content that must survive the aborted placement
    let cart_repo = CartRepository::new(state.db.clone());
    cart_repo
        .save_items(
            &user_id,
            vec![CartItem {
                product: product.id.clone().unwrap(),
                name: product.name.clone(),
                image: None,
                price: product.price,
                size: None,
                color: None,
                quantity: 1,
            }],
        )
        .await
        .unwrap();

    let order_repo = OrderRepository::new(state.db.clone());
    let orders_before = order_repo.count().await.unwrap();

    let err = workflow::place_order(
        &state,
        &user,
        place_request(vec![line_item(&product, None, 2)], PaymentMethod::Card),
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::OrderNumberExhausted);

    // No order, stock or cart changes were persisted
    assert_eq!(order_repo.count().await.unwrap(), orders_before);

    let product_repo = ProductRepository::new(state.db.clone());
    let unchanged = product_repo
        .find_by_number(&product.number)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.stock, 10);

    let cart = cart_repo.find_by_user(&user_id).await.unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);
}
