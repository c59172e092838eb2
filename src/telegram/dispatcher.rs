use std::sync::Arc;

use teloxide::dispatching::DefaultKey;
use teloxide::payloads::{SendMessageSetters, SetWebhook};
use teloxide::prelude::*;
use teloxide::requests::HasPayload;
use teloxide::update_listeners::{webhooks, Polling, UpdateListener};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::{TelegramConfig, UpdateMode};
use crate::db::postgres_service::PostgresService;
use crate::telegram::commands::{command_args, CommandSet};
use crate::types::error::AppError;

pub async fn run(
    bot: Bot,
    db: Arc<PostgresService>,
    config: &TelegramConfig,
) -> Result<(), AppError> {
    let commands = Arc::new(CommandSet::standard());
    let mut dispatcher = build_dispatcher(bot.clone(), db, commands);
    let error_handler = LoggingErrorHandler::with_custom_text("An error from the update listener");

    match config.update_mode {
        UpdateMode::LongPolling => {
            info!("Starting bot with long polling");
            let listener = Polling::builder(bot)
                .allowed_updates(config.allowed_updates.clone())
                .delete_webhook()
                .await
                .build();
            dispatcher.dispatch_with_listener(listener, error_handler).await;
        }
        UpdateMode::Webhook => {
            let url = config
                .host_url
                .clone()
                .ok_or_else(|| AppError::Internal("webhook mode needs TELEGRAM_HOST_URL".into()))?;
            info!("Starting bot with webhook {url} on {}", config.webhook_addr);

            let mut options = webhooks::Options::new(config.webhook_addr, url.clone());
            let secret = options.get_or_gen_secret_token().to_owned();
            let mut request = bot.set_webhook(url.clone());
            *request.payload_mut() = webhook_payload(url, config, secret);
            request.await?;

            let (mut listener, stop_flag, router) = webhooks::axum_no_setup(options);
            let tcp = TcpListener::bind(config.webhook_addr).await.map_err(|e| {
                AppError::Internal(format!("cannot bind {}: {e}", config.webhook_addr))
            })?;
            let stop_token = listener.stop_token();
            tokio::spawn(async move {
                let served = axum::serve(tcp, router).with_graceful_shutdown(stop_flag).await;
                if let Err(err) = served {
                    error!("Webhook server failed: {err}");
                    stop_token.stop();
                }
            });

            dispatcher.dispatch_with_listener(listener, error_handler).await;

            if let Err(err) = bot.delete_webhook().await {
                warn!("Couldn't delete webhook: {err}");
            }
        }
    }

    info!("Bot stopped");
    Ok(())
}

/// `setWebhook` carries the allowed update types, the webhook listener never sends them itself.
fn webhook_payload(url: Url, config: &TelegramConfig, secret: String) -> SetWebhook {
    let mut payload = SetWebhook::new(url);
    payload.allowed_updates = Some(config.allowed_updates.clone());
    payload.secret_token = Some(secret);
    payload
}

fn build_dispatcher(
    bot: Bot,
    db: Arc<PostgresService>,
    commands: Arc<CommandSet>,
) -> Dispatcher<Bot, AppError, DefaultKey> {
    let handler = Update::filter_message().endpoint(handle_message);
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![db, commands])
        .enable_ctrlc_handler()
        .build()
}

async fn handle_message(
    bot: Bot,
    message: Message,
    db: Arc<PostgresService>,
    commands: Arc<CommandSet>,
) -> Result<(), AppError> {
    let text = message.text();
    let Some(command) = commands.find(text) else {
        debug!("No command for message in chat {}", message.chat.id);
        return Ok(());
    };

    let args = command_args(text.unwrap_or_default());
    debug!("Running {} in chat {}", command.name(), message.chat.id);
    let reply = command.execute(args, &db).await?;

    let mut request = bot.send_message(message.chat.id, reply.text);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    request.await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvConfig;
    use teloxide::types::AllowedUpdate;

    #[test]
    fn webhook_registration_sends_allowed_updates() {
        let config = EnvConfig::from_lookup(|key| match key {
            "POSTGRES_URI" => Some("postgres://localhost/buyit".into()),
            "ADMIN_KEY" => Some("secret".into()),
            "TELEGRAM_TOKEN" => Some("123:abc".into()),
            "TELEGRAM_UPDATE_MODE" => Some("webhook".into()),
            "TELEGRAM_HOST_URL" => Some("https://buyit.example.com/bot".into()),
            "TELEGRAM_ALLOWED_UPDATES" => Some("message,callback_query".into()),
            _ => None,
        })
        .unwrap();
        let telegram = config.telegram.unwrap();
        let url = telegram.host_url.clone().unwrap();

        let payload = webhook_payload(url.clone(), &telegram, "s3cret".into());
        assert_eq!(payload.url, url);
        assert_eq!(
            payload.allowed_updates,
            Some(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
        );
        assert_eq!(payload.secret_token.as_deref(), Some("s3cret"));
    }
}
