pub mod category;
pub mod image;
pub mod item;
pub mod order;
pub mod postgres_service;
pub mod property;
pub mod review;
