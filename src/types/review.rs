use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

pub const MIN_RATE: Decimal = Decimal::ONE;
pub const MAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateReview {
    pub item_id: i64,
    pub user_id: Uuid,
    pub rate: Decimal,
    pub cons: Option<String>,
    pub pros: Option<String>,
    pub commentary: Option<String>,
}

impl CreateReview {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.rate < MIN_RATE || self.rate > MAX_RATE {
            return Err(AppError::Validation(format!(
                "rate must be between {MIN_RATE} and {MAX_RATE}, got {}",
                self.rate
            )));
        }
        Ok(())
    }
}
