use actix_web::{delete, post, put, web};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::image::ImageIds;
use crate::types::item::{CreateItem, Item, ItemIds, UpdateItem};
use crate::types::notification::CreatedItemNotification;
use crate::types::property::{ItemProperty, SetItemProperty};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::notify::{notify_created, ItemNotifier};

#[post("")]
pub async fn insert_items(
    db: web::Data<Arc<PostgresService>>,
    notifier: web::Data<Arc<dyn ItemNotifier>>,
    body: web::Json<Vec<CreateItem>>,
) -> ApiResult<Vec<Item>> {
    let inserted = db.insert_items(body.into_inner()).await?;

    let notifications: Vec<CreatedItemNotification> = inserted.iter().map(Into::into).collect();
    let notifier = Arc::clone(notifier.get_ref());
    actix_web::rt::spawn(async move {
        notify_created(notifier.as_ref(), &notifications).await;
    });

    Ok(ApiResponse::Created(inserted))
}

#[put("")]
pub async fn update_items(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<Vec<UpdateItem>>,
) -> ApiResult<Vec<Item>> {
    Ok(ApiResponse::Ok(db.update_items(body.into_inner()).await?))
}

#[delete("")]
pub async fn delete_items(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ItemIds>,
) -> ApiResult<()> {
    Ok(ApiResponse::Affected(db.delete_items(&body.ids).await?))
}

#[post("/archive")]
pub async fn archive_items(
    db: web::Data<Arc<PostgresService>>,
    body: web::Json<ItemIds>,
) -> ApiResult<()> {
    Ok(ApiResponse::Affected(db.mark_items_for_deletion(&body.ids).await?))
}

#[post("/{id}/images")]
pub async fn attach_images(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
    body: web::Json<ImageIds>,
) -> ApiResult<Item> {
    Ok(ApiResponse::Ok(db.attach_images(path.into_inner(), &body.ids).await?))
}

#[put("/{id}/properties")]
pub async fn set_property(
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<i64>,
    body: web::Json<SetItemProperty>,
) -> ApiResult<ItemProperty> {
    Ok(ApiResponse::Ok(db.set_item_property(path.into_inner(), body.into_inner()).await?))
}
