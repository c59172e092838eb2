use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items_category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub item_id: i64,
    pub category_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to   = "super::item::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Item,

    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to   = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef { Relation::Category.def() }
}

impl ActiveModelBehavior for ActiveModel {}
