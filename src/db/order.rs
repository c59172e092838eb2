use chrono::Utc;
use entity::checkout::{
    self, ActiveModel as CheckoutActive, CheckoutStatus, Entity as Checkout,
    Model as CheckoutModel,
};
use entity::order::{self, ActiveModel as OrderActive, Entity as Order, Model as OrderModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::order::{check_transition, CreateCheckout, CreateOrder};

impl PostgresService {
    pub async fn create_order(&self, payload: CreateOrder) -> Result<OrderModel, AppError> {
        payload.validate()?;
        Ok(OrderActive {
            id: Set(payload.id),
            user_id: Set(payload.user_id),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_order(&self, id: i64) -> Result<OrderModel, AppError> {
        Ok(Order::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Order not found".into()))?)
    }

    pub async fn list_orders_for_user(&self, user_id: Uuid) -> Result<Vec<OrderModel>, AppError> {
        Ok(Order::find()
            .filter(order::Column::UserId.eq(user_id))
            .order_by_desc(order::Column::CreatedAt)
            .order_by_desc(order::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    /// Opens a checkout for an order. An order holds at most one checkout that is not cancelled.
    pub async fn create_checkout(
        &self,
        order_id: i64,
        payload: CreateCheckout,
    ) -> Result<CheckoutModel, AppError> {
        payload.validate()?;
        let txn = self.database_connection.begin().await?;

        Order::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Order not found".into()))?;

        let open = Checkout::find()
            .filter(checkout::Column::OrderId.eq(order_id))
            .filter(checkout::Column::Status.ne(CheckoutStatus::Cancelled))
            .count(&txn)
            .await?;
        if open > 0 {
            return Err(AppError::AlreadyExists);
        }

        let created = CheckoutActive {
            order_id: Set(order_id),
            payment_amount: Set(payload.payment_amount),
            status: Set(CheckoutStatus::Created),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        info!("Opened checkout {} for order {}", created.id, order_id);
        Ok(created)
    }

    pub async fn get_checkout(&self, id: i64) -> Result<CheckoutModel, AppError> {
        Ok(Checkout::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Checkout not found".into()))?)
    }

    pub async fn get_checkouts_for_order(
        &self,
        order_id: i64,
    ) -> Result<Vec<CheckoutModel>, AppError> {
        Ok(Checkout::find()
            .filter(checkout::Column::OrderId.eq(order_id))
            .order_by_asc(checkout::Column::Id)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn pay_checkout(&self, id: i64) -> Result<CheckoutModel, AppError> {
        self.transition_checkout(id, CheckoutStatus::Payed).await
    }

    pub async fn cancel_checkout(&self, id: i64) -> Result<CheckoutModel, AppError> {
        self.transition_checkout(id, CheckoutStatus::Cancelled).await
    }

    async fn transition_checkout(
        &self,
        id: i64,
        to: CheckoutStatus,
    ) -> Result<CheckoutModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let current = Checkout::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Checkout not found".into()))?;

        if let Err(err) = check_transition(current.status, to) {
            txn.rollback().await?;
            return Err(err);
        }

        let now = Utc::now();
        let mut am: CheckoutActive = current.into();
        am.status = Set(to);
        match to {
            CheckoutStatus::Payed => am.payed_at = Set(Some(now)),
            CheckoutStatus::Cancelled => am.cancelled_at = Set(Some(now)),
            CheckoutStatus::Created => {}
        }
        let updated = am.update(&txn).await?;
        txn.commit().await?;

        info!("Checkout {} is now {:?}", id, to);
        Ok(updated)
    }
}
