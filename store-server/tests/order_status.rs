//! Order status transition and cancellation tests

mod common;

use common::*;
use shared::ErrorCode;
use store_server::checkout::workflow::{self, StatusChange};
use store_server::db::models::{
    CancelActor, Order, OrderStatus, PaymentMethod, PaymentStatus,
};
use store_server::db::repository::OrderRepository;

async fn place(state: &store_server::ServerState, method: PaymentMethod) -> Order {
    let (user, _) = seed_user(state, "jane", "jane@example.com").await;
    let product = seed_product(state, "Plain tee", 10, vec![]).await;
    workflow::place_order(state, &user, place_request(vec![line_item(&product, None, 1)], method))
        .await
        .unwrap()
}

fn change(status: OrderStatus) -> StatusChange {
    StatusChange {
        status,
        reason: None,
        cancelled_by: None,
    }
}

#[tokio::test]
async fn transition_appends_history_in_order() {
    let state = test_state().await;
    let order = place(&state, PaymentMethod::CashOnDelivery).await;

    workflow::transition_status(&state, &order.number, change(OrderStatus::Accepted))
        .await
        .unwrap();
    workflow::transition_status(&state, &order.number, change(OrderStatus::OutForDelivery))
        .await
        .unwrap();

    let repo = OrderRepository::new(state.db.clone());
    let fetched = repo.find_by_number(&order.number).await.unwrap().unwrap();

    assert_eq!(fetched.order_status, OrderStatus::OutForDelivery);
    assert_eq!(fetched.status_history.len(), 3);
    assert_eq!(
        fetched.status_history.last().unwrap().status,
        OrderStatus::OutForDelivery
    );

    // Timestamps are monotonically non-decreasing
    let stamps: Vec<i64> = fetched.status_history.iter().map(|e| e.at).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn cod_delivery_marks_payment_paid() {
    let state = test_state().await;
    let order = place(&state, PaymentMethod::CashOnDelivery).await;
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    let updated =
        workflow::transition_status(&state, &order.number, change(OrderStatus::Delivered))
            .await
            .unwrap();

    assert_eq!(updated.order_status, OrderStatus::Delivered);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn cod_acceptance_marks_payment_paid() {
    let state = test_state().await;
    let order = place(&state, PaymentMethod::CashOnDelivery).await;

    let updated =
        workflow::transition_status(&state, &order.number, change(OrderStatus::Accepted))
            .await
            .unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Paid);
}

#[tokio::test]
async fn card_delivery_leaves_payment_status_alone() {
    let state = test_state().await;
    let order = place(&state, PaymentMethod::Card).await;

    let updated =
        workflow::transition_status(&state, &order.number, change(OrderStatus::Delivered))
            .await
            .unwrap();

    // Card settlement is tracked by the processor, not this milestone
    assert_eq!(updated.payment_status, PaymentStatus::Pending);
}

#[tokio::test]
async fn admin_cancellation_records_reason_and_actor() {
    let state = test_state().await;
    let order = place(&state, PaymentMethod::CashOnDelivery).await;

    let updated = workflow::transition_status(
        &state,
        &order.number,
        StatusChange {
            status: OrderStatus::Cancelled,
            reason: Some("Out of delivery area".to_string()),
            cancelled_by: Some(CancelActor::Admin),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.order_status, OrderStatus::Cancelled);
    assert_eq!(
        updated.cancellation_reason.as_deref(),
        Some("Out of delivery area")
    );
    assert_eq!(updated.cancelled_by, Some(CancelActor::Admin));
}

#[tokio::test]
async fn unknown_order_number_is_not_found() {
    let state = test_state().await;

    let err = workflow::transition_status(&state, "0000", change(OrderStatus::Accepted))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

#[tokio::test]
async fn owner_can_cancel_pending_order() {
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

    let cancelled = workflow::cancel_own_order(&state, &user, &order.number, None)
        .await
        .unwrap();

    assert_eq!(cancelled.order_status, OrderStatus::Cancelled);
    assert_eq!(cancelled.cancelled_by, Some(CancelActor::User));
    assert_eq!(
        cancelled.cancellation_reason.as_deref(),
        Some("Cancelled by user")
    );
}

#[tokio::test]
async fn non_owner_cannot_cancel() {
    let state = test_state().await;
    let (owner, _) = seed_user(&state, "jane", "jane@example.com").await;
    let (other, _) = seed_user(&state, "john", "john@example.com").await;
    let product = seed_product(&state, "Plain tee", 10, vec![]).await;
    let order = workflow::place_order(
        &state,
        &owner,
        place_request(
            vec![line_item(&product, None, 1)],
            PaymentMethod::CashOnDelivery,
        ),
    )
    .await
    .unwrap();

    let err = workflow::cancel_own_order(&state, &other, &order.number, None)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NotResourceOwner);
}

#[tokio::test]
async fn delivered_order_cannot_be_self_cancelled() {
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

    workflow::transition_status(&state, &order.number, change(OrderStatus::Delivered))
        .await
        .unwrap();

    let err = workflow::cancel_own_order(&state, &user, &order.number, None)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::OrderNotCancellable);
}
