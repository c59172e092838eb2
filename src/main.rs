use std::io;
use std::sync::Arc;

use actix_web::{middleware, web, App, HttpServer};
use buyit::config::{EnvConfig, CONFIG};
use buyit::db::postgres_service::PostgresService;
use buyit::routes::configure_routes;
use buyit::utils::notify::{ItemNotifier, NoopNotifier, TelegramNotifier};
use teloxide::Bot;
use tracing::info;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let addr = format!("0.0.0.0:{}", config.port);
    let config = CONFIG.get_or_init(|| config);

    let postgres_service =
        Arc::new(PostgresService::new(&config.db_url).await.map_err(io::Error::other)?);

    let notifier: Arc<dyn ItemNotifier> = match &config.telegram {
        Some(tg) => match tg.notify_chat_id {
            Some(chat_id) => {
                info!("Created items are announced to chat {chat_id}");
                Arc::new(TelegramNotifier::new(Bot::new(&tg.token), chat_id))
            }
            None => Arc::new(NoopNotifier),
        },
        None => Arc::new(NoopNotifier),
    };

    info!("Starting server on {addr}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(web::Data::new(Arc::clone(&notifier)))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
