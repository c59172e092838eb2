use actix_web::{get, web};
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub database: bool,
}

#[get("")]
pub async fn health(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
) -> ApiResult<Response> {
    db.connection()
        .execute_unprepared("SELECT 1")
        .await
        .map_err(|e| AppError::Internal(format!("database ping failed: {e}")))?;

    Ok(ApiResponse::Ok(Response { database: true }))
}
