use serde::{Deserialize, Serialize};

use crate::types::error::AppError;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
}

impl CreateCategory {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("category name must not be empty".into()));
        }
        Ok(())
    }
}
