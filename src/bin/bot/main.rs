use std::sync::Arc;

use buyit::config::{EnvConfig, CONFIG};
use buyit::db::postgres_service::PostgresService;
use buyit::telegram::dispatcher;
use teloxide::Bot;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let config = EnvConfig::from_env()?;
    let config = CONFIG.get_or_init(|| config);
    let telegram = config
        .telegram
        .as_ref()
        .ok_or("TELEGRAM_TOKEN must be set to run the bot")?;

    let db = Arc::new(PostgresService::new(&config.db_url).await?);
    info!("Connected to database");

    dispatcher::run(Bot::new(&telegram.token), db, telegram).await?;
    Ok(())
}
