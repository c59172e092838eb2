use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,
    pub owner_id: Uuid,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub deleted_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_image::Entity")]
    ItemImage,
    #[sea_orm(has_many = "super::item_category::Entity")]
    ItemCategory,
    #[sea_orm(has_many = "super::review::Entity")]
    Review,
    #[sea_orm(has_many = "super::property_value::Entity")]
    PropertyValue,
}

impl Related<super::item_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemImage.def()
    }
}

impl Related<super::item_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCategory.def()
    }
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Review.def()
    }
}

impl Related<super::property_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyValue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
