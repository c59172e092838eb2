use actix_web::{get, post, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::review::CreateReview;

#[get("/{id}")]
pub async fn get_image(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<entity::image::Model> {
    Ok(ApiResponse::Ok(db.get_image(path.into_inner()).await?))
}

#[post("")]
pub async fn create_review(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CreateReview>,
) -> ApiResult<entity::review::Model> {
    Ok(ApiResponse::Created(db.create_review(body.into_inner()).await?))
}

#[get("")]
pub async fn list_properties(
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Vec<entity::property::Model>> {
    Ok(ApiResponse::Ok(db.list_properties().await?))
}
