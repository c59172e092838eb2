mod common;

use buyit::types::error::AppError;
use buyit::types::order::{CreateCheckout, CreateOrder};
use common::TestContext;
use entity::checkout::CheckoutStatus;
use rust_decimal::Decimal;
use uuid::Uuid;

fn checkout(cents: i64) -> CreateCheckout {
    CreateCheckout { payment_amount: Decimal::new(cents, 2) }
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn orders_are_listed_per_user() {
    let ctx = TestContext::new().await;

    let user = Uuid::new_v4();
    ctx.db.create_order(CreateOrder { id: 1, user_id: user }).await.unwrap();
    ctx.db.create_order(CreateOrder { id: 2, user_id: user }).await.unwrap();
    ctx.db.create_order(CreateOrder { id: 3, user_id: Uuid::new_v4() }).await.unwrap();

    let err = ctx.db.create_order(CreateOrder { id: 1, user_id: user }).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists));

    assert_eq!(ctx.db.list_orders_for_user(user).await.unwrap().len(), 2);
    assert_eq!(ctx.db.get_order(3).await.unwrap().id, 3);
    assert!(matches!(ctx.db.get_order(4).await, Err(AppError::NotFound)));
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn checkout_is_paid_once() {
    let ctx = TestContext::new().await;

    ctx.db.create_order(CreateOrder { id: 1, user_id: Uuid::new_v4() }).await.unwrap();
    let opened = ctx.db.create_checkout(1, checkout(2500)).await.unwrap();
    assert_eq!(opened.status, CheckoutStatus::Created);
    assert!(opened.payed_at.is_none());

    // one open checkout per order
    let err = ctx.db.create_checkout(1, checkout(2500)).await.unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists));

    let paid = ctx.db.pay_checkout(opened.id).await.unwrap();
    assert_eq!(paid.status, CheckoutStatus::Payed);
    assert!(paid.payed_at.is_some());

    assert!(matches!(ctx.db.pay_checkout(opened.id).await, Err(AppError::Conflict(_))));
    assert!(matches!(ctx.db.cancel_checkout(opened.id).await, Err(AppError::Conflict(_))));
    assert_eq!(ctx.db.get_checkout(opened.id).await.unwrap().status, CheckoutStatus::Payed);
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn cancelled_checkout_can_be_reopened() {
    let ctx = TestContext::new().await;

    ctx.db.create_order(CreateOrder { id: 1, user_id: Uuid::new_v4() }).await.unwrap();
    let first = ctx.db.create_checkout(1, checkout(999)).await.unwrap();

    let cancelled = ctx.db.cancel_checkout(first.id).await.unwrap();
    assert_eq!(cancelled.status, CheckoutStatus::Cancelled);
    assert!(cancelled.cancelled_at.is_some());

    let second = ctx.db.create_checkout(1, checkout(899)).await.unwrap();
    let all = ctx.db.get_checkouts_for_order(1).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn checkout_needs_an_order_and_a_positive_amount() {
    let ctx = TestContext::new().await;

    assert!(matches!(
        ctx.db.create_checkout(5, checkout(100)).await,
        Err(AppError::NotFound)
    ));

    ctx.db.create_order(CreateOrder { id: 5, user_id: Uuid::new_v4() }).await.unwrap();
    assert!(matches!(
        ctx.db.create_checkout(5, checkout(0)).await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(ctx.db.pay_checkout(12345).await, Err(AppError::NotFound)));
}
