use entity::category::{ActiveModel as CategoryActive, Entity as Category, Model as CategoryModel};
use sea_orm::{ActiveModelTrait, DbErr, EntityTrait, QueryOrder, Set};

use crate::db::postgres_service::PostgresService;
use crate::types::category::CreateCategory;
use crate::types::error::AppError;

impl PostgresService {
    pub async fn create_category(
        &self,
        payload: CreateCategory,
    ) -> Result<CategoryModel, AppError> {
        payload.validate()?;
        Ok(CategoryActive {
            name: Set(payload.name.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn get_category(&self, id: i64) -> Result<CategoryModel, AppError> {
        Ok(Category::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Category not found".into()))?)
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryModel>, AppError> {
        Ok(Category::find()
            .order_by_asc(entity::category::Column::Name)
            .all(&self.database_connection)
            .await?)
    }
}
