use actix_web::{get, post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::item::{Item, ItemIds, ItemsPage, Pagination};
use crate::types::property::ItemProperty;
use crate::types::response::{ApiResponse, ApiResult};

#[get("")]
pub async fn list_items(
    db: web::Data<Arc<PostgresService>>,
    query: web::Query<Pagination>,
) -> ApiResult<ItemsPage> {
    Ok(ApiResponse::Ok(db.get_items(query.into_inner()).await?))
}

#[post("/lookup")]
pub async fn lookup_items(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ItemIds>,
) -> ApiResult<Vec<Item>> {
    Ok(ApiResponse::Ok(db.get_items_by_ids(&body.ids).await?))
}

#[get("/{id}")]
pub async fn get_item(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<Item> {
    Ok(ApiResponse::Ok(db.get_item_by_id(path.into_inner()).await?))
}

#[get("/{id}/reviews")]
pub async fn item_reviews(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<Vec<entity::review::Model>> {
    Ok(ApiResponse::Ok(db.list_reviews_for_item(path.into_inner()).await?))
}

#[get("/{id}/properties")]
pub async fn item_properties(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<Vec<ItemProperty>> {
    Ok(ApiResponse::Ok(db.list_item_properties(path.into_inner()).await?))
}
