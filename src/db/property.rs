use entity::item::Entity as ItemData;
use entity::property::{ActiveModel as PropertyActive, Entity as Property, Model as PropertyModel};
use entity::property_value::{self, ActiveModel as ValueActive, Entity as PropertyValue};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::property::{normalize_value, CreateProperty, ItemProperty, SetItemProperty};

impl PostgresService {
    pub async fn create_property(
        &self,
        payload: CreateProperty,
    ) -> Result<PropertyModel, AppError> {
        payload.validate()?;
        Ok(PropertyActive {
            name: Set(payload.name.trim().to_string()),
            kind: Set(payload.kind),
            ..Default::default()
        }
        .insert(&self.database_connection)
        .await?)
    }

    pub async fn list_properties(&self) -> Result<Vec<PropertyModel>, AppError> {
        Ok(Property::find()
            .order_by_asc(entity::property::Column::Name)
            .all(&self.database_connection)
            .await?)
    }

    /// Upserts the value of one property on one item.
    pub async fn set_item_property(
        &self,
        item_id: i64,
        payload: SetItemProperty,
    ) -> Result<ItemProperty, AppError> {
        let txn = self.database_connection.begin().await?;

        if ItemData::find_by_id(item_id).count(&txn).await? == 0 {
            return Err(DbErr::RecordNotFound("Item not found".into()).into());
        }
        let property = Property::find_by_id(payload.property_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("Property not found".into()))?;

        let value = normalize_value(property.kind, payload.value.as_deref())?;

        let existing = PropertyValue::find()
            .filter(property_value::Column::PropertyId.eq(property.id))
            .filter(property_value::Column::ItemId.eq(item_id))
            .one(&txn)
            .await?;

        match existing {
            Some(row) => {
                let mut am: ValueActive = row.into();
                am.value = Set(value.clone());
                am.update(&txn).await?;
            }
            None => {
                ValueActive {
                    property_id: Set(property.id),
                    item_id: Set(item_id),
                    value: Set(value.clone()),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
        txn.commit().await?;

        Ok(ItemProperty {
            property_id: property.id,
            name: property.name,
            kind: property.kind,
            value,
        })
    }

    pub async fn list_item_properties(&self, item_id: i64) -> Result<Vec<ItemProperty>, AppError> {
        Ok(PropertyValue::find()
            .filter(property_value::Column::ItemId.eq(item_id))
            .find_also_related(Property)
            .order_by_asc(property_value::Column::PropertyId)
            .all(&self.database_connection)
            .await?
            .into_iter()
            .filter_map(|(value, property)| {
                property.map(|p| ItemProperty {
                    property_id: p.id,
                    name: p.name,
                    kind: p.kind,
                    value: value.value,
                })
            })
            .collect())
    }
}
