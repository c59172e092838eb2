use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties_values")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub property_id: i64,
    pub item_id: i64,
    pub value: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::property::Entity",
        from = "Column::PropertyId",
        to   = "super::property::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Property,

    #[sea_orm(
        belongs_to = "super::item::Entity",
        from = "Column::ItemId",
        to   = "super::item::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Item,
}

impl Related<super::property::Entity> for Entity {
    fn to() -> RelationDef { Relation::Property.def() }
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl ActiveModelBehavior for ActiveModel {}
