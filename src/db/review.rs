use entity::review::{ActiveModel as ReviewActive, Entity as Review, Model as ReviewModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::review::CreateReview;

impl PostgresService {
    pub async fn create_review(&self, payload: CreateReview) -> Result<ReviewModel, AppError> {
        payload.validate()?;
        if !self.item_exists(payload.item_id).await? {
            return Err(AppError::NotFound);
        }

        Ok(ReviewActive {
            rate: Set(payload.rate),
            review_text_cons: Set(payload.cons),
            review_text_pros: Set(payload.pros),
            review_text_commentary: Set(payload.commentary),
            user_id: Set(payload.user_id),
            item_id: Set(payload.item_id),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn list_reviews_for_item(&self, item_id: i64) -> Result<Vec<ReviewModel>, AppError> {
        Ok(Review::find()
            .filter(entity::review::Column::ItemId.eq(item_id))
            .order_by_desc(entity::review::Column::CreatedAt)
            .order_by_desc(entity::review::Column::Id)
            .all(&self.database_connection)
            .await?)
    }
}
