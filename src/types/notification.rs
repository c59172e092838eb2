use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::item::Item;

/// Published once per item after an insert commits.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreatedItemNotification {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    pub price: Decimal,
    pub images_urls: Vec<String>,
}

impl From<&Item> for CreatedItemNotification {
    fn from(item: &Item) -> Self {
        CreatedItemNotification {
            id: item.id,
            name: item.name.clone(),
            description: item.description.clone(),
            owner_id: item.owner_id,
            price: item.price,
            images_urls: item.image_urls.clone(),
        }
    }
}

impl CreatedItemNotification {
    pub fn render(&self) -> String {
        let mut text = format!("New item #{}: {}\nPrice: {:.2}", self.id, self.name, self.price);
        if !self.description.trim().is_empty() {
            text.push_str("\n\n");
            text.push_str(self.description.trim());
        }
        for url in &self.images_urls {
            text.push('\n');
            text.push_str(url);
        }
        text
    }
}
