use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reviews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub rate: Decimal,
    pub review_text_cons: Option<String>,
    pub review_text_pros: Option<String>,
    pub review_text_commentary: Option<String>,
    pub user_id: Uuid,
    pub item_id: i64,
    pub created_at: DateTimeUtc,
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
}

impl Related<super::item::Entity> for Entity {
    fn to() -> RelationDef { Relation::Item.def() }
}

impl ActiveModelBehavior for ActiveModel {}
