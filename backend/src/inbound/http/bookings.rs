//! Booking API handlers.

use actix_web::{HttpRequest, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use crate::domain::ports::{
    BookingPayload, CreateBookingRequest, DecideBookingRequest, GetBookingRequest,
    ListBookingsRequest,
};
use crate::domain::{BookingId, Error, ItemId, TemporalFilter};

use super::error::ApiResult;
use super::state::HttpState;
use super::validation::{PageParams, require_user_id};

/// Item snapshot embedded in a booking view.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookedItemDto {
    /// Item identifier.
    pub id: i64,
    /// Item name at projection time.
    pub name: String,
    /// Availability toggle at projection time.
    pub available: bool,
}

/// Booker snapshot embedded in a booking view.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookerDto {
    /// User identifier.
    pub id: i64,
    /// Display name at projection time.
    pub name: String,
}

/// Booking representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BookingDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Inclusive window start.
    pub start: DateTime<Utc>,
    /// Exclusive window end.
    pub end: DateTime<Utc>,
    /// Approval status token: `WAITING`, `APPROVED` or `REJECTED`.
    pub status: String,
    /// Snapshot of the booked item.
    pub item: BookedItemDto,
    /// Snapshot of the requesting user.
    pub booker: BookerDto,
}

impl From<BookingPayload> for BookingDto {
    fn from(payload: BookingPayload) -> Self {
        Self {
            id: payload.id.value(),
            start: payload.start,
            end: payload.end,
            status: payload.status.to_string(),
            item: BookedItemDto {
                id: payload.item.id.value(),
                name: payload.item.name,
                available: payload.item.available,
            },
            booker: BookerDto {
                id: payload.booker.id.value(),
                name: payload.booker.name,
            },
        }
    }
}

/// Body of `POST /bookings`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingBody {
    /// The item to book.
    pub item_id: i64,
    /// Requested window start.
    pub start: DateTime<Utc>,
    /// Requested window end; must lie strictly after `start`.
    pub end: DateTime<Utc>,
}

/// Decision query parameter for `PATCH /bookings/{id}`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct DecisionParams {
    /// `true` approves, `false` rejects.
    pub approved: bool,
}

/// Listing parameters: temporal filter token plus the shared page window.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// Filter token; defaults to `ALL`, parsed case-insensitively.
    pub state: Option<String>,
}

fn parse_filter(state: Option<String>) -> Result<TemporalFilter, Error> {
    state
        .as_deref()
        .unwrap_or("ALL")
        .parse::<TemporalFilter>()
        .map_err(|err| Error::invalid_filter(err.to_string()))
}

/// Request a booking; it starts out waiting for the owner.
#[utoipa::path(
    post,
    path = "/bookings",
    request_body = CreateBookingBody,
    params(("X-Sharer-User-Id" = i64, Header, description = "Booking user")),
    responses(
        (status = 200, description = "Booking created in WAITING", body = BookingDto),
        (status = 400, description = "Degenerate interval or item not bookable"),
        (status = 404, description = "Unknown item, unknown booker, or own item")
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    request: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Json<CreateBookingBody>,
) -> ApiResult<web::Json<BookingDto>> {
    let booker_id = require_user_id(&request)?;
    let body = body.into_inner();
    let payload = state
        .bookings
        .create_booking(CreateBookingRequest {
            booker_id,
            item_id: ItemId::new(body.item_id),
            start: body.start,
            end: body.end,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// Approve or reject a waiting booking as the item owner.
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking identifier"),
        DecisionParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user; must own the item")
    ),
    responses(
        (status = 200, description = "Decision applied", body = BookingDto),
        (status = 400, description = "Booking already decided"),
        (status = 404, description = "No such booking for this owner")
    ),
    tags = ["bookings"],
    operation_id = "decideBooking"
)]
#[patch("/bookings/{id}")]
pub async fn decide_booking(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    decision: web::Query<DecisionParams>,
) -> ApiResult<web::Json<BookingDto>> {
    let acting_owner_id = require_user_id(&request)?;
    let payload = state
        .bookings
        .decide_booking(DecideBookingRequest {
            booking_id: BookingId::new(path.into_inner()),
            acting_owner_id,
            approve: decision.approved,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// Fetch one booking as its booker or the item owner.
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    params(
        ("id" = i64, Path, description = "Booking identifier"),
        ("X-Sharer-User-Id" = i64, Header, description = "Viewing user")
    ),
    responses(
        (status = 200, description = "Booking", body = BookingDto),
        (status = 404, description = "No such booking for this user")
    ),
    tags = ["bookings"],
    operation_id = "getBooking"
)]
#[get("/bookings/{id}")]
pub async fn get_booking(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<BookingDto>> {
    let user_id = require_user_id(&request)?;
    let payload = state
        .bookings_query
        .get_booking(GetBookingRequest {
            booking_id: BookingId::new(path.into_inner()),
            user_id,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// The calling user's bookings as booker, start descending.
#[utoipa::path(
    get,
    path = "/bookings",
    params(
        ListParams,
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Booking user")
    ),
    responses(
        (status = 200, description = "Bookings as booker", body = [BookingDto]),
        (status = 400, description = "Unknown state token"),
        (status = 404, description = "Unknown user")
    ),
    tags = ["bookings"],
    operation_id = "listBookingsForBooker"
)]
#[get("/bookings")]
pub async fn list_bookings_for_booker(
    request: HttpRequest,
    state: web::Data<HttpState>,
    list: web::Query<ListParams>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<BookingDto>>> {
    let user_id = require_user_id(&request)?;
    let filter = parse_filter(list.into_inner().state)?;
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state
        .bookings_query
        .list_for_booker(ListBookingsRequest {
            user_id,
            filter,
            page,
        })
        .await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// Bookings of the calling user's items.
#[utoipa::path(
    get,
    path = "/bookings/owner",
    params(
        ListParams,
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Item owner")
    ),
    responses(
        (status = 200, description = "Bookings of owned items", body = [BookingDto]),
        (status = 400, description = "Unknown state token"),
        (status = 404, description = "Unknown user")
    ),
    tags = ["bookings"],
    operation_id = "listBookingsForOwner"
)]
#[get("/bookings/owner")]
pub async fn list_bookings_for_owner(
    request: HttpRequest,
    state: web::Data<HttpState>,
    list: web::Query<ListParams>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<BookingDto>>> {
    let user_id = require_user_id(&request)?;
    let filter = parse_filter(list.into_inner().state)?;
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state
        .bookings_query
        .list_for_owner(ListBookingsRequest {
            user_id,
            filter,
            page,
        })
        .await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}
