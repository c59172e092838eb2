pub mod category;
pub mod error;
pub mod image;
pub mod item;
pub mod notification;
pub mod order;
pub mod property;
pub mod response;
pub mod review;
