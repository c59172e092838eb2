use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Connection factory and repository handle. Clones share one sea-orm pool.
#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let mut options = ConnectOptions::new(uri.to_owned());
        options.sqlx_logging(false);
        let database_connection = Database::connect(options).await?;

        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Connected to PostgreSQL, migrations finished.");

        Ok(Self { database_connection })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
