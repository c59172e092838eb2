use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use entity::image::Entity as Image;
use entity::item::{self, ActiveModel as ItemActive, Entity as ItemData, Model as ItemModel};
use entity::item_category::{self, ActiveModel as ItemCategoryActive, Entity as ItemCategory};
use entity::item_image::{self, ActiveModel as ItemImageActive, Entity as ItemImage};
use entity::review::{self, Entity as Review};
use rust_decimal::Decimal;
use sea_orm::sea_query::extension::postgres::PgFunc;
use sea_orm::sea_query::{Expr, Func, IntoColumnRef, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::item::{
    CreateItem, Item, ItemsPage, Pagination, PaginationResponse, Rating, UpdateItem,
};

#[derive(Debug, FromQueryResult)]
struct RatingRow {
    item_id: i64,
    value: Option<Decimal>,
    review_count: i64,
}

impl PostgresService {
    pub async fn get_item_by_id(&self, id: i64) -> Result<Item, AppError> {
        let model = ItemData::find_by_id(id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("Item {id} not found")))?;

        enrich(&self.database_connection, vec![model])
            .await?
            .pop()
            .ok_or(AppError::NotFound)
    }

    pub async fn item_exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(ItemData::find_by_id(id).count(&self.database_connection).await? > 0)
    }

    /// One page of listable (not soft-deleted) items plus the total listable count.
    pub async fn get_items(&self, pagination: Pagination) -> Result<ItemsPage, AppError> {
        pagination.validate()?;

        let listable = ItemData::find().filter(item::Column::DeletedAt.is_null());
        let amount = listable.clone().count(&self.database_connection).await?;
        let rows = listable
            .order_by_asc(item::Column::Id)
            .limit(pagination.count)
            .offset(pagination.offset)
            .all(&self.database_connection)
            .await?;

        Ok(ItemsPage {
            items: enrich(&self.database_connection, rows).await?,
            pagination: PaginationResponse { amount },
        })
    }

    pub async fn get_items_by_ids(&self, ids: &[i64]) -> Result<Vec<Item>, AppError> {
        load_by_ids(&self.database_connection, ids).await
    }

    pub async fn get_items_by_category(&self, category_id: i64) -> Result<Vec<Item>, AppError> {
        let rows = ItemData::find()
            .inner_join(ItemCategory)
            .filter(item_category::Column::CategoryId.eq(category_id))
            .filter(item::Column::DeletedAt.is_null())
            .order_by_asc(item::Column::Id)
            .all(&self.database_connection)
            .await?;

        enrich(&self.database_connection, rows).await
    }

    /// Inserts the items with their category and image links in one transaction.
    pub async fn insert_items(&self, items: Vec<CreateItem>) -> Result<Vec<Item>, AppError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        let mut seen = BTreeSet::new();
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id) {
                let msg = format!("item {} appears twice in the batch", item.id);
                return Err(AppError::Validation(msg));
            }
        }

        let txn = self.database_connection.begin().await?;

        ItemData::insert_many(items.iter().map(|i| ItemActive {
            id: Set(i.id),
            name: Set(i.name.clone()),
            description: Set(i.description.clone()),
            price: Set(i.price),
            owner_id: Set(i.owner_id),
            ..Default::default()
        }))
        .exec(&txn)
        .await?;

        let category_links: Vec<ItemCategoryActive> = items
            .iter()
            .flat_map(|i| {
                let unique: BTreeSet<i64> = i.category_ids.iter().copied().collect();
                unique.into_iter().map(move |category_id| ItemCategoryActive {
                    item_id: Set(i.id),
                    category_id: Set(category_id),
                    ..Default::default()
                })
            })
            .collect();
        if !category_links.is_empty() {
            ItemCategory::insert_many(category_links).exec(&txn).await?;
        }

        let image_links: Vec<ItemImageActive> = items
            .iter()
            .flat_map(|i| {
                let mut seen = BTreeSet::new();
                i.image_ids
                    .iter()
                    .copied()
                    .filter(move |id| seen.insert(*id))
                    .map(move |image_id| ItemImageActive {
                        item_id: Set(i.id),
                        image_id: Set(image_id),
                        ..Default::default()
                    })
            })
            .collect();
        if !image_links.is_empty() {
            ItemImage::insert_many(image_links).exec(&txn).await?;
        }

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let inserted = load_by_ids(&txn, &ids).await?;
        txn.commit().await?;

        info!("Inserted {} item(s)", inserted.len());
        Ok(inserted)
    }

    /// Overwrites name, description, price and owner. Category links are left alone.
    pub async fn update_items(&self, items: Vec<UpdateItem>) -> Result<Vec<Item>, AppError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }
        for item in &items {
            item.validate()?;
        }

        let now = Utc::now();
        let txn = self.database_connection.begin().await?;
        for i in &items {
            let am = ItemActive {
                id: Set(i.id),
                name: Set(i.name.clone()),
                description: Set(i.description.clone()),
                price: Set(i.price),
                owner_id: Set(i.owner_id),
                updated_at: Set(Some(now)),
                ..Default::default()
            };
            am.update(&txn).await.map_err(|err| match err {
                DbErr::RecordNotUpdated => AppError::NotFound,
                other => other.into(),
            })?;
        }

        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let updated = load_by_ids(&txn, &ids).await?;
        txn.commit().await?;
        Ok(updated)
    }

    /// Hard delete. Link rows, reviews and property values cascade.
    pub async fn delete_items(&self, ids: &[i64]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = ItemData::delete_many()
            .filter(any_of(item::Column::Id, ids))
            .exec(&self.database_connection)
            .await?;
        info!("Deleted {} item(s)", res.rows_affected);
        Ok(res.rows_affected)
    }

    /// Soft delete: stamps `deleted_at` on items that do not carry one yet.
    pub async fn mark_items_for_deletion(&self, ids: &[i64]) -> Result<u64, AppError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let now = Utc::now();
        let res = ItemData::update_many()
            .col_expr(item::Column::DeletedAt, Expr::value(now))
            .col_expr(item::Column::UpdatedAt, Expr::value(now))
            .filter(any_of(item::Column::Id, ids))
            .filter(item::Column::DeletedAt.is_null())
            .exec(&self.database_connection)
            .await?;
        info!("Marked {} item(s) for deletion", res.rows_affected);
        Ok(res.rows_affected)
    }
}

/// `column = ANY($1)` with the ids bound as one array parameter.
fn any_of<C: IntoColumnRef>(column: C, ids: &[i64]) -> SimpleExpr {
    Expr::col(column).eq(PgFunc::any(ids.to_vec()))
}

async fn load_by_ids<C: ConnectionTrait>(conn: &C, ids: &[i64]) -> Result<Vec<Item>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let rows = ItemData::find()
        .filter(any_of(item::Column::Id, ids))
        .order_by_asc(item::Column::Id)
        .all(conn)
        .await?;
    enrich(conn, rows).await
}

/// Attaches image urls, rating and category ids to item rows.
///
/// Each relation is fetched with a single query over the whole row set, so the number of
/// round-trips stays at three regardless of how many rows come in.
async fn enrich<C: ConnectionTrait>(conn: &C, rows: Vec<ItemModel>) -> Result<Vec<Item>, AppError> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();

    let mut images: HashMap<i64, Vec<String>> = HashMap::new();
    for (link, image) in ItemImage::find()
        .filter(any_of(item_image::Column::ItemId, &ids))
        .find_also_related(Image)
        .order_by_asc(item_image::Column::Id)
        .all(conn)
        .await?
    {
        if let Some(image) = image {
            images.entry(link.item_id).or_default().push(image.url);
        }
    }

    let ratings: HashMap<i64, Rating> = Review::find()
        .select_only()
        .column(review::Column::ItemId)
        .column_as(SimpleExpr::from(Func::avg(Expr::col(review::Column::Rate))), "value")
        .column_as(Expr::col(review::Column::Id).count(), "review_count")
        .filter(any_of(review::Column::ItemId, &ids))
        .group_by(review::Column::ItemId)
        .into_model::<RatingRow>()
        .all(conn)
        .await?
        .into_iter()
        .map(|r| {
            let rating = Rating {
                value: r.value.map(|v| v.round_dp(2)),
                review_count: r.review_count,
            };
            (r.item_id, rating)
        })
        .collect();

    let mut categories: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in ItemCategory::find()
        .filter(any_of(item_category::Column::ItemId, &ids))
        .order_by_asc(item_category::Column::CategoryId)
        .all(conn)
        .await?
    {
        categories.entry(link.item_id).or_default().push(link.category_id);
    }

    debug!("Enriched {} item row(s)", rows.len());
    Ok(rows
        .into_iter()
        .map(|model| {
            let id = model.id;
            Item::from_model(
                model,
                images.remove(&id).unwrap_or_default(),
                ratings.get(&id).cloned().unwrap_or_default(),
                categories.remove(&id).unwrap_or_default(),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn id_set_is_bound_as_one_array() {
        let ids: Vec<i64> = (1..=70_000).collect();
        let stmt = ItemData::find()
            .filter(any_of(item::Column::Id, &ids))
            .build(DbBackend::Postgres);

        assert!(stmt.sql.contains(r#""id" = ANY($1)"#), "{}", stmt.sql);
        assert_eq!(stmt.values.map(|v| v.0.len()), Some(1));
    }
}
