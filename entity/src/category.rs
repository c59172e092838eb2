use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::item_category::Entity")]
    ItemCategory,
}

impl Related<super::item_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
