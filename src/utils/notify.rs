use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{info, warn};

use crate::types::error::AppError;
use crate::types::notification::CreatedItemNotification;

#[async_trait]
pub trait ItemNotifier: Send + Sync {
    async fn item_created(&self, notification: &CreatedItemNotification) -> Result<(), AppError>;
}

/// Used when no notification chat is configured.
pub struct NoopNotifier;

#[async_trait]
impl ItemNotifier for NoopNotifier {
    async fn item_created(&self, _: &CreatedItemNotification) -> Result<(), AppError> {
        Ok(())
    }
}

/// Posts created items to a Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self { bot, chat_id: ChatId(chat_id) }
    }
}

#[async_trait]
impl ItemNotifier for TelegramNotifier {
    async fn item_created(&self, notification: &CreatedItemNotification) -> Result<(), AppError> {
        self.bot
            .send_message(self.chat_id, notification.render())
            .await?;
        info!("Sent created-item notification for item {}", notification.id);
        Ok(())
    }
}

/// Notifies about every item; a failed send is logged and does not stop the rest.
pub async fn notify_created(
    notifier: &dyn ItemNotifier,
    notifications: &[CreatedItemNotification],
) -> usize {
    let mut sent = 0;
    for n in notifications {
        match notifier.item_created(n).await {
            Ok(()) => sent += 1,
            Err(e) => warn!("Failed to send created-item notification for item {}: {}", n.id, e),
        }
    }
    sent
}
