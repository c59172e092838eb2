use sea_orm_migration::prelude::*;

/// Items, images, reviews, properties, orders and checkouts.
///
/// Forward-only: `down` keeps the trait's default, which refuses to run.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Images::Table)
                .col(ColumnDef::new(Images::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Images::FileName).string().not_null())
                .col(ColumnDef::new(Images::Description).string_len(512).null())
                .col(ColumnDef::new(Images::Url).string_len(512).not_null())
                .col(
                    ColumnDef::new(Images::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(ColumnDef::new(Images::DeletedAt).timestamp_with_time_zone().null())
                .to_owned(),
        )
        .await?;

        migrate_items(m).await?;
        migrate_reviews(m).await?;
        migrate_properties(m).await?;
        migrate_orders_and_checkouts(m).await?;

        Ok(())
    }
}

async fn migrate_items(m: &SchemaManager<'_>) -> Result<(), DbErr> {
    m.create_table(
        Table::create()
            .table(Items::Table)
            .col(ColumnDef::new(Items::Id).big_integer().not_null().primary_key())
            .col(ColumnDef::new(Items::Name).string().not_null())
            .col(ColumnDef::new(Items::Description).string().not_null())
            .col(ColumnDef::new(Items::Price).decimal_len(19, 4).not_null())
            .col(ColumnDef::new(Items::OwnerId).uuid().not_null())
            .col(
                ColumnDef::new(Items::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(ColumnDef::new(Items::UpdatedAt).timestamp_with_time_zone().null())
            .col(ColumnDef::new(Items::DeletedAt).timestamp_with_time_zone().null())
            .to_owned(),
    )
    .await?;

    m.create_table(
        Table::create()
            .table(ItemsImages::Table)
            .col(
                ColumnDef::new(ItemsImages::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(ItemsImages::ItemId).big_integer().not_null())
            .col(ColumnDef::new(ItemsImages::ImageId).uuid().not_null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_items_images_item")
                    .from(ItemsImages::Table, ItemsImages::ItemId)
                    .to(Items::Table, Items::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_items_images_image")
                    .from(ItemsImages::Table, ItemsImages::ImageId)
                    .to(Images::Table, Images::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
    )
    .await?;

    m.create_index(
        Index::create()
            .name("idx_items_images_item_id")
            .table(ItemsImages::Table)
            .col(ItemsImages::ItemId)
            .to_owned(),
    )
    .await
}

async fn migrate_reviews(m: &SchemaManager<'_>) -> Result<(), DbErr> {
    m.create_table(
        Table::create()
            .table(Reviews::Table)
            .col(
                ColumnDef::new(Reviews::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Reviews::Rate).decimal_len(19, 4).not_null())
            .col(ColumnDef::new(Reviews::ReviewTextCons).string().null())
            .col(ColumnDef::new(Reviews::ReviewTextPros).string().null())
            .col(ColumnDef::new(Reviews::ReviewTextCommentary).string().null())
            .col(ColumnDef::new(Reviews::UserId).uuid().not_null())
            .col(ColumnDef::new(Reviews::ItemId).big_integer().not_null())
            .col(
                ColumnDef::new(Reviews::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_reviews_item")
                    .from(Reviews::Table, Reviews::ItemId)
                    .to(Items::Table, Items::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
    )
    .await?;

    m.create_index(
        Index::create()
            .name("idx_reviews_item_id")
            .table(Reviews::Table)
            .col(Reviews::ItemId)
            .to_owned(),
    )
    .await
}

async fn migrate_properties(m: &SchemaManager<'_>) -> Result<(), DbErr> {
    m.get_connection()
        .execute_unprepared("CREATE TYPE property_kind AS ENUM ('String', 'Float', 'Number')")
        .await?;

    m.create_table(
        Table::create()
            .table(Properties::Table)
            .col(
                ColumnDef::new(Properties::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Properties::Name).string().not_null().unique_key())
            .col(
                ColumnDef::new(Properties::Kind)
                    .custom(Alias::new("property_kind"))
                    .not_null(),
            )
            .to_owned(),
    )
    .await?;

    m.create_table(
        Table::create()
            .table(PropertiesValues::Table)
            .col(
                ColumnDef::new(PropertiesValues::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(PropertiesValues::PropertyId).big_integer().not_null())
            .col(ColumnDef::new(PropertiesValues::ItemId).big_integer().not_null())
            .col(ColumnDef::new(PropertiesValues::Value).string().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_properties_values_property")
                    .from(PropertiesValues::Table, PropertiesValues::PropertyId)
                    .to(Properties::Table, Properties::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .name("fk_properties_values_item")
                    .from(PropertiesValues::Table, PropertiesValues::ItemId)
                    .to(Items::Table, Items::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned(),
    )
    .await
}

async fn migrate_orders_and_checkouts(m: &SchemaManager<'_>) -> Result<(), DbErr> {
    m.create_table(
        Table::create()
            .table(Orders::Table)
            .col(ColumnDef::new(Orders::Id).big_integer().not_null().primary_key())
            .col(ColumnDef::new(Orders::UserId).uuid().not_null())
            .col(
                ColumnDef::new(Orders::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .to_owned(),
    )
    .await?;

    m.get_connection()
        .execute_unprepared("CREATE TYPE checkout_status AS ENUM ('Created', 'Payed', 'Cancelled')")
        .await?;

    m.create_table(
        Table::create()
            .table(Checkouts::Table)
            .col(
                ColumnDef::new(Checkouts::Id)
                    .big_integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Checkouts::OrderId).big_integer().not_null())
            .col(ColumnDef::new(Checkouts::PaymentAmount).decimal_len(19, 4).not_null())
            .col(
                ColumnDef::new(Checkouts::Status)
                    .custom(Alias::new("checkout_status"))
                    .not_null(),
            )
            .col(
                ColumnDef::new(Checkouts::CreatedAt)
                    .timestamp_with_time_zone()
                    .not_null()
                    .default(Expr::current_timestamp()),
            )
            .col(ColumnDef::new(Checkouts::PayedAt).timestamp_with_time_zone().null())
            .col(ColumnDef::new(Checkouts::CancelledAt).timestamp_with_time_zone().null())
            .foreign_key(
                ForeignKey::create()
                    .name("fk_checkouts_order")
                    .from(Checkouts::Table, Checkouts::OrderId)
                    .to(Orders::Table, Orders::Id),
            )
            .to_owned(),
    )
    .await
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    FileName,
    Description,
    Url,
    CreatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Items {
    Table,
    Id,
    Name,
    Description,
    Price,
    OwnerId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum ItemsImages {
    Table,
    Id,
    ItemId,
    ImageId,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    Id,
    Rate,
    ReviewTextCons,
    ReviewTextPros,
    ReviewTextCommentary,
    UserId,
    ItemId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Name,
    Kind,
}

#[derive(DeriveIden)]
pub(crate) enum PropertiesValues {
    Table,
    Id,
    PropertyId,
    ItemId,
    Value,
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Checkouts {
    Table,
    Id,
    OrderId,
    PaymentAmount,
    Status,
    CreatedAt,
    PayedAt,
    CancelledAt,
}
