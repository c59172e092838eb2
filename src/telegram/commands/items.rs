use std::fmt::Write;

use async_trait::async_trait;

use super::{Reply, TelegramCommand};
use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::item::{Item, ItemsPage, Pagination, MAX_OFFSET};

pub const ITEMS_PER_PAGE: u64 = 5;

/// `/items [page]`: one page of listable items, newest ids last.
pub struct ItemsCommand;

/// `/item <id>`: full card of a single item.
pub struct ItemCommand;

#[async_trait]
impl TelegramCommand for ItemsCommand {
    fn name(&self) -> &'static str {
        "/items"
    }

    async fn execute(&self, args: &str, db: &PostgresService) -> Result<Reply, AppError> {
        let Some(page) = parse_page(args) else {
            return Ok(Reply::text("Usage: /items [page], page starts at 1"));
        };
        let Some(offset) = page_offset(page) else {
            return Ok(Reply::text(format!("Page {page} is out of range.")));
        };
        let listing = db.get_items(Pagination { count: ITEMS_PER_PAGE, offset }).await?;
        Ok(Reply::text(format_items_page(&listing, page)))
    }
}

#[async_trait]
impl TelegramCommand for ItemCommand {
    fn name(&self) -> &'static str {
        "/item"
    }

    async fn execute(&self, args: &str, db: &PostgresService) -> Result<Reply, AppError> {
        let Some(id) = args.parse::<i64>().ok().filter(|id| *id > 0) else {
            return Ok(Reply::text("Usage: /item <id>"));
        };
        match db.get_item_by_id(id).await {
            Ok(item) => Ok(Reply::text(format_item(&item))),
            Err(AppError::NotFound) => Ok(Reply::text(format!("Item #{id} not found."))),
            Err(err) => Err(err),
        }
    }
}

fn parse_page(args: &str) -> Option<u64> {
    if args.is_empty() {
        return Some(1);
    }
    args.parse::<u64>().ok().filter(|page| *page >= 1)
}

/// Offset of the first item on `page`, `None` when it falls outside what can be queried.
fn page_offset(page: u64) -> Option<u64> {
    page.checked_sub(1)?
        .checked_mul(ITEMS_PER_PAGE)
        .filter(|offset| *offset <= MAX_OFFSET)
}

pub fn format_items_page(listing: &ItemsPage, page: u64) -> String {
    let amount = listing.pagination.amount;
    if listing.items.is_empty() {
        if amount == 0 {
            return "No items yet.".to_string();
        }
        let pages = amount.div_ceil(ITEMS_PER_PAGE);
        return format!("Page {page} is empty, there are {pages} page(s).");
    }

    let first = page.saturating_sub(1) * ITEMS_PER_PAGE + 1;
    let last = first + listing.items.len() as u64 - 1;
    let mut out = format!("Items {first}-{last} of {amount}:\n");
    for item in &listing.items {
        let _ = writeln!(out, "#{} {} - {:.2}", item.id, item.name, item.price);
    }
    if last < amount {
        let _ = write!(out, "\nNext page: /items {}", page + 1);
    }
    out.trim_end().to_string()
}

pub fn format_item(item: &Item) -> String {
    let mut out = format!("{} (#{})\nPrice: {:.2}\n", item.name, item.id, item.price);
    match item.rating.value {
        Some(value) => {
            let _ = writeln!(out, "Rating: {value:.2} ({} reviews)", item.rating.review_count);
        }
        None => out.push_str("Rating: no reviews yet\n"),
    }
    if !item.description.trim().is_empty() {
        let _ = writeln!(out, "\n{}", item.description.trim());
    }
    if !item.category_ids.is_empty() {
        let ids: Vec<String> = item.category_ids.iter().map(i64::to_string).collect();
        let _ = writeln!(out, "Categories: {}", ids.join(", "));
    }
    for url in &item.image_urls {
        let _ = writeln!(out, "{url}");
    }
    if item.deleted_at.is_some() {
        out.push_str("This item is no longer available.\n");
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::item::{PaginationResponse, Rating};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn item(id: i64, name: &str, cents: i64) -> Item {
        Item {
            id,
            name: name.into(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            owner_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
            image_urls: vec![],
            rating: Rating::default(),
            category_ids: vec![],
        }
    }

    fn listing(items: Vec<Item>, amount: u64) -> ItemsPage {
        ItemsPage { items, pagination: PaginationResponse { amount } }
    }

    #[test]
    fn page_argument() {
        assert_eq!(parse_page(""), Some(1));
        assert_eq!(parse_page("3"), Some(3));
        assert_eq!(parse_page("0"), None);
        assert_eq!(parse_page("-1"), None);
        assert_eq!(parse_page("two"), None);
    }

    #[test]
    fn page_offsets_stay_queryable() {
        assert_eq!(page_offset(1), Some(0));
        assert_eq!(page_offset(3), Some(10));
        assert_eq!(page_offset(0), None);
        assert_eq!(page_offset(u64::MAX), None);
        assert_eq!(page_offset(MAX_OFFSET / ITEMS_PER_PAGE + 2), None);
    }

    #[test]
    fn first_page_links_to_the_next() {
        let items = (1..=5).map(|i| item(i, "Mug", 350)).collect();
        let text = format_items_page(&listing(items, 7), 1);
        assert!(text.starts_with("Items 1-5 of 7:\n#1 Mug - 3.50"));
        assert!(text.ends_with("Next page: /items 2"));
    }

    #[test]
    fn last_page_has_no_link() {
        let page = listing(vec![item(6, "Lamp", 1200), item(7, "Desk", 9900)], 7);
        let text = format_items_page(&page, 2);
        assert_eq!(text, "Items 6-7 of 7:\n#6 Lamp - 12.00\n#7 Desk - 99.00");
    }

    #[test]
    fn empty_listings() {
        assert_eq!(format_items_page(&listing(vec![], 0), 1), "No items yet.");
        assert_eq!(
            format_items_page(&listing(vec![], 7), 4),
            "Page 4 is empty, there are 2 page(s)."
        );
    }

    #[test]
    fn item_card() {
        let mut kettle = item(12, "Kettle", 1999);
        kettle.description = "Boils water".into();
        kettle.rating = Rating { value: Some(Decimal::new(450, 2)), review_count: 2 };
        kettle.category_ids = vec![1, 3];
        kettle.image_urls = vec!["https://img.example.com/k.png".into()];

        assert_eq!(
            format_item(&kettle),
            "Kettle (#12)\nPrice: 19.99\nRating: 4.50 (2 reviews)\n\nBoils water\n\
             Categories: 1, 3\nhttps://img.example.com/k.png"
        );
    }

    #[test]
    fn archived_item_card() {
        let mut mug = item(3, "Mug", 100);
        mug.deleted_at = Some(Utc::now());
        assert_eq!(
            format_item(&mug),
            "Mug (#3)\nPrice: 1.00\nRating: no reviews yet\nThis item is no longer available."
        );
    }
}
