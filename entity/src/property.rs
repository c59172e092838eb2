use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Postgres `property_kind` enum. Values are stored as text and checked against the kind on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "property_kind")]
pub enum PropertyKind {
    #[sea_orm(string_value = "String")]
    #[serde(rename = "String")]
    Text,
    #[sea_orm(string_value = "Float")]
    Float,
    #[sea_orm(string_value = "Number")]
    Number,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub kind: PropertyKind,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::property_value::Entity")]
    PropertyValue,
}

impl Related<super::property_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyValue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
