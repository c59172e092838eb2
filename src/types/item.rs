use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::error::AppError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;
/// Offsets are bound as a signed bigint.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Average rate and number of reviews, recomputed on every read.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Rating {
    pub value: Option<Decimal>,
    pub review_count: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub image_urls: Vec<String>,
    pub rating: Rating,
    pub category_ids: Vec<i64>,
}

impl Item {
    pub fn from_model(
        model: entity::item::Model,
        image_urls: Vec<String>,
        rating: Rating,
        category_ids: Vec<i64>,
    ) -> Self {
        Item {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            owner_id: model.owner_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
            deleted_at: model.deleted_at,
            image_urls,
            rating,
            category_ids,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub owner_id: Uuid,
    #[serde(default)]
    pub category_ids: Vec<i64>,
    #[serde(default)]
    pub image_ids: Vec<Uuid>,
}

impl CreateItem {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(self.id, &self.name, self.price)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub owner_id: Uuid,
}

impl UpdateItem {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_fields(self.id, &self.name, self.price)
    }
}

fn validate_fields(id: i64, name: &str, price: Decimal) -> Result<(), AppError> {
    if id <= 0 {
        return Err(AppError::Validation(format!("item id must be positive, got {id}")));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation(format!("item {id} has an empty name")));
    }
    if price.is_sign_negative() {
        return Err(AppError::Validation(format!("item {id} has a negative price")));
    }
    Ok(())
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    #[serde(default = "default_count")]
    pub count: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_count() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination { count: DEFAULT_PAGE_SIZE, offset: 0 }
    }
}

impl Pagination {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.count == 0 || self.count > MAX_PAGE_SIZE {
            return Err(AppError::Validation(format!(
                "count must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if self.offset > MAX_OFFSET {
            return Err(AppError::Validation(format!("offset must not exceed {MAX_OFFSET}")));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PaginationResponse {
    /// Total number of listable items, independent of the requested page.
    pub amount: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ItemsPage {
    pub items: Vec<Item>,
    pub pagination: PaginationResponse,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ItemIds {
    pub ids: Vec<i64>,
}
