//! Telegram front-end: a fixed command table matched against the first word of each message.

pub mod commands;
pub mod dispatcher;
