use crate::utils::webutils::validate_admin_token;
use actix_web::web;

pub mod admin;
pub mod catalog;
pub mod categories;
pub mod health;
pub mod items;
pub mod orders;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let admin_auth =
        actix_web_httpauth::middleware::HttpAuthentication::bearer(validate_admin_token);

    cfg.service(web::scope("/health").service(health::health));
    cfg.service(
        web::scope("/items")
            .service(items::list_items)
            .service(items::lookup_items)
            .service(items::get_item)
            .service(items::item_reviews)
            .service(items::item_properties),
    );
    cfg.service(
        web::scope("/categories")
            .service(categories::list_categories)
            .service(categories::get_category)
            .service(categories::category_items),
    );
    cfg.service(web::scope("/images").service(catalog::get_image));
    cfg.service(web::scope("/reviews").service(catalog::create_review));
    cfg.service(web::scope("/properties").service(catalog::list_properties));
    cfg.service(
        web::scope("/orders")
            .service(orders::create_order)
            .service(orders::user_orders)
            .service(orders::get_order)
            .service(orders::create_checkout)
            .service(orders::order_checkouts),
    );
    cfg.service(
        web::scope("/checkouts")
            .service(orders::get_checkout)
            .service(orders::pay_checkout)
            .service(orders::cancel_checkout),
    );
    cfg.service(
        web::scope("/admin")
            .wrap(admin_auth)
            .service(
                web::scope("/items")
                    .service(admin::items::insert_items)
                    .service(admin::items::update_items)
                    .service(admin::items::delete_items)
                    .service(admin::items::archive_items)
                    .service(admin::items::attach_images)
                    .service(admin::items::set_property),
            )
            .service(web::scope("/categories").service(admin::catalog::create_category))
            .service(web::scope("/images").service(admin::catalog::create_image))
            .service(web::scope("/properties").service(admin::catalog::create_property)),
    );
}
