pub mod category;
pub mod checkout;
pub mod image;
pub mod item;
pub mod item_category;
pub mod item_image;
pub mod order;
pub mod property;
pub mod property_value;
pub mod review;

/*
 Items are the catalog. Images, categories, reviews and property values hang off an item
 through link tables; deleting an item cascades to all of them.
 Orders carry no item lines, a checkout holds the payable amount for an order and moves
 Created -> Payed or Created -> Cancelled, never back.
 */
