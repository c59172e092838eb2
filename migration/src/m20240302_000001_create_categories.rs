use sea_orm_migration::prelude::*;

use crate::m20240301_000001_create_items_orders::{Items, PropertiesValues};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Categories::Table)
                .col(
                    ColumnDef::new(Categories::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(Categories::Name).string().not_null().unique_key())
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(ItemsCategory::Table)
                .col(
                    ColumnDef::new(ItemsCategory::Id)
                        .big_integer()
                        .not_null()
                        .auto_increment()
                        .primary_key(),
                )
                .col(ColumnDef::new(ItemsCategory::ItemId).big_integer().not_null())
                .col(ColumnDef::new(ItemsCategory::CategoryId).big_integer().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_items_category_item")
                        .from(ItemsCategory::Table, ItemsCategory::ItemId)
                        .to(Items::Table, Items::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_items_category_category")
                        .from(ItemsCategory::Table, ItemsCategory::CategoryId)
                        .to(Categories::Table, Categories::Id)
                        .on_delete(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("uk_items_category_item_category")
                .table(ItemsCategory::Table)
                .col(ItemsCategory::ItemId)
                .col(ItemsCategory::CategoryId)
                .unique()
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_items_category_category_id")
                .table(ItemsCategory::Table)
                .col(ItemsCategory::CategoryId)
                .to_owned(),
        )
        .await?;

        // one value per (property, item)
        m.create_index(
            Index::create()
                .name("uk_properties_values_property_item")
                .table(PropertiesValues::Table)
                .col(PropertiesValues::PropertyId)
                .col(PropertiesValues::ItemId)
                .unique()
                .to_owned(),
        )
        .await?;

        // at most one checkout per order that is not cancelled
        m.get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uk_checkouts_open_order ON checkouts (order_id) \
                 WHERE status <> 'Cancelled'",
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum ItemsCategory {
    Table,
    Id,
    ItemId,
    CategoryId,
}
