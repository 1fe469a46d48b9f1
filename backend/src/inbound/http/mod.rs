//! HTTP inbound adapter exposing REST endpoints.

pub mod bookings;
pub mod error;
pub mod health;
pub mod item_requests;
pub mod items;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;
pub use state::HttpState;

use actix_web::web;

/// Register every business route on the given service config.
///
/// Health probes are registered separately so deployments can expose them
/// outside the main API surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(users::create_user)
        .service(users::list_users)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(items::create_item)
        .service(items::list_owner_items)
        .service(items::search_items)
        .service(items::get_item)
        .service(items::update_item)
        .service(items::add_comment)
        .service(bookings::create_booking)
        .service(bookings::list_bookings_for_booker)
        .service(bookings::list_bookings_for_owner)
        .service(bookings::get_booking)
        .service(bookings::decide_booking)
        .service(item_requests::create_request)
        .service(item_requests::list_own_requests)
        .service(item_requests::list_other_requests)
        .service(item_requests::get_request);
}
