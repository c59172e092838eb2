use actix_web::{get, post, web};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::order::{CreateCheckout, CreateOrder};
use crate::types::response::{ApiResponse, ApiResult};

use entity::checkout::Model as CheckoutModel;
use entity::order::Model as OrderModel;

#[post("")]
pub async fn create_order(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<CreateOrder>,
) -> ApiResult<OrderModel> {
    Ok(ApiResponse::Created(db.create_order(body.into_inner()).await?))
}

#[get("/{id}")]
pub async fn get_order(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<OrderModel> {
    Ok(ApiResponse::Ok(db.get_order(path.into_inner()).await?))
}

#[get("/user/{user_id}")]
pub async fn user_orders(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<Uuid>,
) -> ApiResult<Vec<OrderModel>> {
    Ok(ApiResponse::Ok(db.list_orders_for_user(path.into_inner()).await?))
}

#[post("/{id}/checkout")]
pub async fn create_checkout(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
    body: web::Json<CreateCheckout>,
) -> ApiResult<CheckoutModel> {
    Ok(ApiResponse::Created(db.create_checkout(path.into_inner(), body.into_inner()).await?))
}

#[get("/{id}/checkouts")]
pub async fn order_checkouts(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<Vec<CheckoutModel>> {
    Ok(ApiResponse::Ok(db.get_checkouts_for_order(path.into_inner()).await?))
}

#[get("/{id}")]
pub async fn get_checkout(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<CheckoutModel> {
    Ok(ApiResponse::Ok(db.get_checkout(path.into_inner()).await?))
}

#[post("/{id}/pay")]
pub async fn pay_checkout(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<CheckoutModel> {
    Ok(ApiResponse::Ok(db.pay_checkout(path.into_inner()).await?))
}

#[post("/{id}/cancel")]
pub async fn cancel_checkout(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
) -> ApiResult<CheckoutModel> {
    Ok(ApiResponse::Ok(db.cancel_checkout(path.into_inner()).await?))
}
