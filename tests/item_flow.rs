mod common;

use buyit::types::category::CreateCategory;
use buyit::types::error::AppError;
use buyit::types::image::CreateImage;
use buyit::types::item::{Pagination, UpdateItem};
use common::{test_data, TestContext};
use rust_decimal::Decimal;

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn insert_and_read_back_items() {
    let ctx = TestContext::new().await;

    let category = ctx
        .db
        .create_category(CreateCategory { name: "Kitchen".into() })
        .await
        .unwrap();
    let image = ctx
        .db
        .create_image(CreateImage {
            file_name: "kettle.png".into(),
            description: None,
            url: "https://img.example.com/kettle.png".into(),
        })
        .await
        .unwrap();

    let mut kettle = test_data::sample_item(1);
    kettle.category_ids = vec![category.id, category.id];
    kettle.image_ids = vec![image.id];
    let inserted = ctx
        .db
        .insert_items(vec![kettle, test_data::sample_item(2)])
        .await
        .unwrap();

    assert_eq!(inserted.len(), 2);
    assert_eq!(inserted[0].id, 1);
    assert_eq!(inserted[0].category_ids, vec![category.id]);
    assert_eq!(inserted[0].image_urls, vec!["https://img.example.com/kettle.png".to_string()]);
    assert_eq!(inserted[0].rating.review_count, 0);
    assert!(inserted[0].rating.value.is_none());
    assert!(inserted[1].image_urls.is_empty());

    let fetched = ctx.db.get_item_by_id(1).await.unwrap();
    assert_eq!(fetched, inserted[0]);
    assert!(ctx.db.item_exists(2).await.unwrap());
    assert!(!ctx.db.item_exists(3).await.unwrap());
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn insert_is_all_or_nothing() {
    let ctx = TestContext::new().await;

    ctx.db.insert_items(vec![test_data::sample_item(1)]).await.unwrap();

    // item 1 already exists, so item 2 must not be kept either
    let err = ctx
        .db
        .insert_items(vec![test_data::sample_item(2), test_data::sample_item(1)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AlreadyExists));
    assert!(!ctx.db.item_exists(2).await.unwrap());

    let mut orphan = test_data::sample_item(3);
    orphan.category_ids = vec![999];
    let err = ctx.db.insert_items(vec![orphan]).await.unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
    assert!(!ctx.db.item_exists(3).await.unwrap());
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn duplicate_ids_in_one_batch_are_rejected() {
    let ctx = TestContext::new().await;

    let err = ctx
        .db
        .insert_items(vec![test_data::sample_item(5), test_data::sample_item(5)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn missing_item_is_not_found() {
    let ctx = TestContext::new().await;

    assert!(matches!(ctx.db.get_item_by_id(42).await, Err(AppError::NotFound)));
    assert!(ctx.db.get_items_by_ids(&[42, 43]).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn pagination_counts_all_listable_items() {
    let ctx = TestContext::new().await;

    let batch = (1..=7).map(test_data::sample_item).collect();
    ctx.db.insert_items(batch).await.unwrap();

    let page = ctx.db.get_items(Pagination { count: 3, offset: 3 }).await.unwrap();
    assert_eq!(page.pagination.amount, 7);
    let ids: Vec<i64> = page.items.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![4, 5, 6]);

    let past_end = ctx.db.get_items(Pagination { count: 3, offset: 30 }).await.unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.pagination.amount, 7);

    let err = ctx.db.get_items(Pagination { count: 0, offset: 0 }).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn soft_deleted_items_leave_listings_but_stay_addressable() {
    let ctx = TestContext::new().await;

    let category = ctx
        .db
        .create_category(CreateCategory { name: "Lamps".into() })
        .await
        .unwrap();
    let batch = (1..=3)
        .map(|id| {
            let mut item = test_data::sample_item(id);
            item.category_ids = vec![category.id];
            item
        })
        .collect();
    ctx.db.insert_items(batch).await.unwrap();

    assert_eq!(ctx.db.mark_items_for_deletion(&[2, 99]).await.unwrap(), 1);
    // already marked rows are not stamped again
    assert_eq!(ctx.db.mark_items_for_deletion(&[2]).await.unwrap(), 0);

    let page = ctx.db.get_items(Pagination::default()).await.unwrap();
    assert_eq!(page.pagination.amount, 2);
    assert!(page.items.iter().all(|i| i.id != 2));

    let in_category = ctx.db.get_items_by_category(category.id).await.unwrap();
    let ids: Vec<i64> = in_category.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 3]);

    let archived = ctx.db.get_item_by_id(2).await.unwrap();
    assert!(archived.deleted_at.is_some());
    assert_eq!(ctx.db.get_items_by_ids(&[1, 2, 3]).await.unwrap().len(), 3);
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn update_overwrites_fields() {
    let ctx = TestContext::new().await;

    let original = test_data::sample_item(1);
    let owner = original.owner_id;
    ctx.db.insert_items(vec![original]).await.unwrap();

    let updated = ctx
        .db
        .update_items(vec![UpdateItem {
            id: 1,
            name: "Renamed".into(),
            description: "New description".into(),
            price: Decimal::new(500, 2),
            owner_id: owner,
        }])
        .await
        .unwrap();

    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].name, "Renamed");
    assert_eq!(updated[0].price, Decimal::new(500, 2));
    assert!(updated[0].updated_at.is_some());

    let err = ctx
        .db
        .update_items(vec![UpdateItem {
            id: 77,
            name: "Ghost".into(),
            description: String::new(),
            price: Decimal::ONE,
            owner_id: owner,
        }])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn hard_delete_cascades_to_reviews() {
    let ctx = TestContext::new().await;

    ctx.db
        .insert_items(vec![test_data::sample_item(1), test_data::sample_item(2)])
        .await
        .unwrap();
    ctx.db.create_review(test_data::sample_review(1, 4)).await.unwrap();

    assert_eq!(ctx.db.delete_items(&[1, 3]).await.unwrap(), 1);
    assert!(!ctx.db.item_exists(1).await.unwrap());
    assert!(ctx.db.list_reviews_for_item(1).await.unwrap().is_empty());
    assert_eq!(ctx.db.delete_items(&[]).await.unwrap(), 0);
}

#[tokio::test]
#[ignore = "needs a container runtime for Postgres"]
async fn id_sets_beyond_the_bind_limit() {
    let ctx = TestContext::new().await;

    ctx.db
        .insert_items(vec![test_data::sample_item(1), test_data::sample_item(70_000)])
        .await
        .unwrap();

    // more ids than Postgres accepts as separate bind parameters
    let ids: Vec<i64> = (1..=70_000).collect();

    let found = ctx.db.get_items_by_ids(&ids).await.unwrap();
    let found_ids: Vec<i64> = found.iter().map(|i| i.id).collect();
    assert_eq!(found_ids, vec![1, 70_000]);

    assert_eq!(ctx.db.mark_items_for_deletion(&ids).await.unwrap(), 2);
    assert_eq!(ctx.db.delete_items(&ids).await.unwrap(), 2);
    assert!(ctx.db.get_items_by_ids(&ids).await.unwrap().is_empty());
}
