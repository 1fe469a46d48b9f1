//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (users, items,
//!   bookings, item requests, health)
//! - **Schemas**: Wire DTOs plus the domain error wrappers ([`ErrorSchema`],
//!   [`ErrorCodeSchema`]) that provide OpenAPI definitions without coupling
//!   domain types to the utoipa framework

use utoipa::OpenApi;

use crate::inbound::http::bookings::{
    BookedItemDto, BookerDto, BookingDto, CreateBookingBody,
};
use crate::inbound::http::item_requests::{CreateRequestBody, ItemRequestDto};
use crate::inbound::http::items::{
    BookingBriefDto, CommentBody, CommentDto, CreateItemBody, ItemDetailsDto, ItemDto,
    UpdateItemBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CreateUserBody, UpdateUserBody, UserDto};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Item sharing backend API",
        description = "HTTP interface for sharing items between users: \
                       catalogue management, booking lifecycle, and item requests."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::items::create_item,
        crate::inbound::http::items::list_owner_items,
        crate::inbound::http::items::search_items,
        crate::inbound::http::items::get_item,
        crate::inbound::http::items::update_item,
        crate::inbound::http::items::add_comment,
        crate::inbound::http::bookings::create_booking,
        crate::inbound::http::bookings::list_bookings_for_booker,
        crate::inbound::http::bookings::list_bookings_for_owner,
        crate::inbound::http::bookings::get_booking,
        crate::inbound::http::bookings::decide_booking,
        crate::inbound::http::item_requests::create_request,
        crate::inbound::http::item_requests::list_own_requests,
        crate::inbound::http::item_requests::list_other_requests,
        crate::inbound::http::item_requests::get_request,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserDto,
        CreateUserBody,
        UpdateUserBody,
        ItemDto,
        ItemDetailsDto,
        CreateItemBody,
        UpdateItemBody,
        BookingBriefDto,
        CommentDto,
        CommentBody,
        BookingDto,
        BookedItemDto,
        BookerDto,
        CreateBookingBody,
        ItemRequestDto,
        CreateRequestBody,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "users", description = "User registration and profiles"),
        (name = "items", description = "The shared item catalogue"),
        (name = "bookings", description = "Booking lifecycle and conflict checks"),
        (name = "requests", description = "Requests for items nobody has listed yet"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn openapi_document_covers_every_business_path() {
        let doc = ApiDoc::openapi();
        for path in [
            "/users",
            "/users/{id}",
            "/items",
            "/items/{id}",
            "/items/search",
            "/items/{id}/comment",
            "/bookings",
            "/bookings/{id}",
            "/bookings/owner",
            "/requests",
            "/requests/all",
            "/requests/{id}",
        ] {
            assert!(
                doc.paths.paths.contains_key(path),
                "document should describe {path}"
            );
        }
    }
}
