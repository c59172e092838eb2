use actix_web::{get, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::item::Item;
use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
pub async fn list_categories(
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<entity::category::Model>> {
    Ok(ApiResponse::Ok(db.list_categories().await?))
}

#[get("/{id}")]
pub async fn get_category(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<entity::category::Model> {
    Ok(ApiResponse::Ok(db.get_category(path.into_inner()).await?))
}

#[get("/{id}/items")]
pub async fn category_items(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<Vec<Item>> {
    Ok(ApiResponse::Ok(db.get_items_by_category(path.into_inner()).await?))
}
