use actix_web::{post, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::category::CreateCategory;
use crate::types::image::CreateImage;
use crate::types::property::CreateProperty;
use crate::types::response::{ApiResponse, ApiResult};

#[post("")]
pub async fn create_category(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CreateCategory>,
) -> ApiResult<entity::category::Model> {
    Ok(ApiResponse::Created(db.create_category(body.into_inner()).await?))
}

#[post("")]
pub async fn create_image(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CreateImage>,
) -> ApiResult<entity::image::Model> {
    Ok(ApiResponse::Created(db.create_image(body.into_inner()).await?))
}

#[post("")]
pub async fn create_property(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CreateProperty>,
) -> ApiResult<entity::property::Model> {
    Ok(ApiResponse::Created(db.create_property(body.into_inner()).await?))
}
