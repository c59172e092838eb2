#![allow(dead_code)]

use std::sync::Arc;

use buyit::config::{EnvConfig, CONFIG};
use buyit::db::postgres_service::PostgresService;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub mod client;

pub const TEST_ADMIN_KEY: &str = "test-admin-key";

pub struct TestContext {
    pub db: Arc<PostgresService>,
    pub _container: ContainerAsync<Postgres>,
}

impl TestContext {
    /// Starts a throwaway Postgres and runs migrations against it.
    ///
    /// Tests using it are `#[ignore]`d by default; run them with `cargo test -- --ignored`
    /// where Docker is available.
    pub async fn new() -> TestContext {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container.get_host_port_ipv4(5432).await.expect("Failed to get port");
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = Arc::new(
            PostgresService::new(&db_url)
                .await
                .expect("Failed to initialize PostgresService"),
        );

        TestContext { db, _container: container }
    }
}

pub fn init_test_config() -> &'static EnvConfig {
    CONFIG.get_or_init(|| EnvConfig {
        port: 8080,
        db_url: "test".to_string(), // not used, tests connect to the container directly
        admin_key: TEST_ADMIN_KEY.to_string(),
        telegram: None,
    })
}

pub mod test_data {
    use buyit::types::item::CreateItem;
    use buyit::types::review::CreateReview;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    pub fn sample_item(id: i64) -> CreateItem {
        CreateItem {
            id,
            name: format!("Item {id}"),
            description: format!("Description of item {id}"),
            price: Decimal::new(id * 100 + 99, 2),
            owner_id: Uuid::new_v4(),
            category_ids: vec![],
            image_ids: vec![],
        }
    }

    pub fn sample_review(item_id: i64, rate: i64) -> CreateReview {
        CreateReview {
            item_id,
            user_id: Uuid::new_v4(),
            rate: Decimal::from(rate),
            cons: None,
            pros: Some("Works".to_string()),
            commentary: None,
        }
    }
}
