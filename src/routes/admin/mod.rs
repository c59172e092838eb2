pub mod catalog;
pub mod items;
