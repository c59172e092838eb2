use async_trait::async_trait;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

use super::{Reply, TelegramCommand};
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;

pub const GREETING: &str = "Здарова, отец! Добро пожаловать в BuyIt.";
pub const KEYBOARD: [&str; 3] = ["Привет", "Hello", "Hola"];

pub struct StartCommand;

impl StartCommand {
    pub fn reply() -> Reply {
        let row: Vec<KeyboardButton> =
            KEYBOARD.iter().map(|label| KeyboardButton::new(*label)).collect();
        Reply {
            text: GREETING.to_string(),
            keyboard: Some(KeyboardMarkup::new(vec![row]).resize_keyboard()),
        }
    }
}

#[async_trait]
impl TelegramCommand for StartCommand {
    fn name(&self) -> &'static str {
        "/start"
    }

    async fn execute(&self, _args: &str, _db: &PostgresService) -> Result<Reply, AppError> {
        Ok(Self::reply())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greets_with_a_single_row_keyboard() {
        let reply = StartCommand::reply();
        assert_eq!(reply.text, GREETING);

        let keyboard = reply.keyboard.expect("start reply carries a keyboard");
        assert_eq!(keyboard.keyboard.len(), 1);
        let labels: Vec<&str> = keyboard.keyboard[0].iter().map(|b| b.text.as_str()).collect();
        assert_eq!(labels, KEYBOARD);
        assert!(keyboard.resize_keyboard);
    }
}
