use std::collections::BTreeSet;

use entity::image::{ActiveModel as ImageActive, Entity as Image, Model as ImageModel};
use entity::item_image::{ActiveModel as ItemImageActive, Entity as ItemImage};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::image::CreateImage;
use crate::types::item::Item;

impl PostgresService {
    pub async fn create_image(&self, payload: CreateImage) -> Result<ImageModel, AppError> {
        payload.validate()?;
        Ok(ImageActive {
            id: Set(Uuid::new_v4()),
            file_name: Set(payload.file_name),
            description: Set(payload.description),
            url: Set(payload.url),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_image(&self, id: Uuid) -> Result<ImageModel, AppError> {
        Ok(Image::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Image not found".into()))?)
    }

    /// Links images to an existing item, skipping images it already shows.
    pub async fn attach_images(&self, item_id: i64, image_ids: &[Uuid]) -> Result<Item, AppError> {
        let item = self.get_item_by_id(item_id).await?;

        let already: BTreeSet<Uuid> = ItemImage::find()
            .filter(entity::item_image::Column::ItemId.eq(item_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|link| link.image_id)
            .collect();

        let mut seen = already;
        let links: Vec<ItemImageActive> = image_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .map(|image_id| ItemImageActive {
                item_id: Set(item.id),
                image_id: Set(image_id),
                ..Default::default()
            })
            .collect();

        if links.is_empty() {
            return Ok(item);
        }
        ItemImage::insert_many(links).exec(&self.database_connection).await?;

        self.get_item_by_id(item_id).await
    }
}
