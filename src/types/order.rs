use entity::checkout::CheckoutStatus;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateOrder {
    pub id: i64,
    pub user_id: Uuid,
}

impl CreateOrder {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.id <= 0 {
            return Err(AppError::Validation(format!("order id must be positive, got {}", self.id)));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateCheckout {
    pub payment_amount: Decimal,
}

impl CreateCheckout {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.payment_amount <= Decimal::ZERO {
            return Err(AppError::Validation("payment_amount must be positive".into()));
        }
        Ok(())
    }
}

/// A checkout only ever leaves `Created`.
pub fn check_transition(from: CheckoutStatus, to: CheckoutStatus) -> Result<(), AppError> {
    match (from, to) {
        (CheckoutStatus::Created, CheckoutStatus::Payed)
        | (CheckoutStatus::Created, CheckoutStatus::Cancelled) => Ok(()),
        (from, to) => Err(AppError::Conflict(format!(
            "checkout cannot move from {from:?} to {to:?}"
        ))),
    }
}
