pub mod config;
pub mod db;
pub mod routes;
pub mod telegram;
pub mod types;
pub mod utils;
