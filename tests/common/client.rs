use std::sync::Arc;

use actix_web::{web, App};
use buyit::db::postgres_service::PostgresService;
use buyit::utils::notify::{ItemNotifier, NoopNotifier};

use super::{init_test_config, TEST_ADMIN_KEY};

pub struct TestClient {
    pub db: Arc<PostgresService>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        init_test_config();
        TestClient { db }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        self.create_app_with_notifier(Arc::new(NoopNotifier))
    }

    pub fn create_app_with_notifier(&self, notifier: Arc<dyn ItemNotifier>) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(notifier))
            .configure(buyit::routes::configure_routes)
    }

    pub fn admin_header(&self) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", TEST_ADMIN_KEY))
    }
}
