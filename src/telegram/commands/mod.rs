use async_trait::async_trait;
use teloxide::types::KeyboardMarkup;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;

pub mod items;
pub mod start;

pub use items::{ItemCommand, ItemsCommand};
pub use start::StartCommand;

/// What a command wants sent back to the chat.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<KeyboardMarkup>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply { text: text.into(), keyboard: None }
    }
}

#[async_trait]
pub trait TelegramCommand: Send + Sync {
    /// Lower-case command word including the leading slash.
    fn name(&self) -> &'static str;

    fn matches(&self, text: Option<&str>) -> bool {
        command_token(text).is_some_and(|token| token == self.name())
    }

    /// `args` is the message text after the command word, trimmed.
    async fn execute(&self, args: &str, db: &PostgresService) -> Result<Reply, AppError>;
}

/// First whitespace-delimited word, lower-cased, without a `@botname` suffix.
pub fn command_token(text: Option<&str>) -> Option<String> {
    let word = text?.split_whitespace().next()?;
    let word = word.split('@').next().unwrap_or(word);
    Some(word.to_lowercase())
}

pub fn command_args(text: &str) -> &str {
    match text.trim_start().split_once(char::is_whitespace) {
        Some((_, rest)) => rest.trim(),
        None => "",
    }
}

pub struct CommandSet {
    commands: Vec<Box<dyn TelegramCommand>>,
}

impl CommandSet {
    pub fn new(commands: Vec<Box<dyn TelegramCommand>>) -> Self {
        Self { commands }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(StartCommand),
            Box::new(ItemsCommand),
            Box::new(ItemCommand),
        ])
    }

    /// No fallback: a message no command claims yields `None`.
    pub fn find(&self, text: Option<&str>) -> Option<&dyn TelegramCommand> {
        self.commands
            .iter()
            .find(|c| c.matches(text))
            .map(|c| c.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_case_insensitive_first_word() {
        assert_eq!(command_token(Some("/START now")), Some("/start".into()));
        assert_eq!(command_token(Some("  /items\t2")), Some("/items".into()));
        assert_eq!(command_token(Some("/start@BuyItBot")), Some("/start".into()));
        assert_eq!(command_token(Some("")), None);
        assert_eq!(command_token(Some("   ")), None);
        assert_eq!(command_token(None), None);
    }

    #[test]
    fn args_follow_the_command_word() {
        assert_eq!(command_args("/item 42"), "42");
        assert_eq!(command_args("/items   3  "), "3");
        assert_eq!(command_args("/start"), "");
    }

    #[test]
    fn standard_set_dispatches_by_first_word() {
        let set = CommandSet::standard();
        assert_eq!(set.find(Some("/Start")).map(|c| c.name()), Some("/start"));
        assert_eq!(set.find(Some("/items 2")).map(|c| c.name()), Some("/items"));
        assert_eq!(set.find(Some("/item 7")).map(|c| c.name()), Some("/item"));
        assert!(set.find(Some("/starting")).is_none());
        assert!(set.find(Some("hello /start")).is_none());
        assert!(set.find(Some("Hello")).is_none());
        assert!(set.find(None).is_none());
    }
}
