//! Item API handlers: catalog CRUD, search, and comments.

use actix_web::{HttpRequest, get, patch, post, web};
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use crate::domain::ItemId;
use crate::domain::ports::{
    AddCommentRequest, BookingBrief, CommentPayload, CreateItemRequest, ItemDetailsPayload,
    ItemPayload, SearchItemsRequest, UpdateItemRequest,
};

use super::error::ApiResult;
use super::state::HttpState;
use super::validation::{PageParams, require_user_id};

/// Item representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Owner-controlled booking toggle.
    pub available: bool,
    /// Owning user.
    pub owner_id: i64,
    /// Item request this listing answers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
}

impl From<ItemPayload> for ItemDto {
    fn from(payload: ItemPayload) -> Self {
        Self {
            id: payload.id.value(),
            name: payload.name,
            description: payload.description,
            available: payload.available,
            owner_id: payload.owner_id.value(),
            request_id: payload.request_id.map(|id| id.value()),
        }
    }
}

/// Abbreviated booking embedded in an owner's item view.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingBriefDto {
    /// Booking identifier.
    pub id: i64,
    /// The booking user.
    pub booker_id: i64,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

impl From<BookingBrief> for BookingBriefDto {
    fn from(brief: BookingBrief) -> Self {
        Self {
            id: brief.id.value(),
            booker_id: brief.booker_id.value(),
            start: brief.start,
            end: brief.end,
        }
    }
}

/// Comment representation on the wire.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Comment body.
    pub text: String,
    /// Author display name at projection time.
    pub author_name: String,
    /// Creation instant.
    pub created: DateTime<Utc>,
}

impl From<CommentPayload> for CommentDto {
    fn from(payload: CommentPayload) -> Self {
        Self {
            id: payload.id.value(),
            text: payload.text,
            author_name: payload.author_name,
            created: payload.created,
        }
    }
}

/// Item detail view: item fields plus comments and, for the owner, the
/// closest past and future approved bookings.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetailsDto {
    /// Store-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Owner-controlled booking toggle.
    pub available: bool,
    /// Item request this listing answers, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i64>,
    /// Latest approved booking starting at or before now; owner view only.
    pub last_booking: Option<BookingBriefDto>,
    /// Earliest approved booking starting after now; owner view only.
    pub next_booking: Option<BookingBriefDto>,
    /// Comments, oldest first.
    pub comments: Vec<CommentDto>,
}

impl From<ItemDetailsPayload> for ItemDetailsDto {
    fn from(payload: ItemDetailsPayload) -> Self {
        Self {
            id: payload.item.id.value(),
            name: payload.item.name,
            description: payload.item.description,
            available: payload.item.available,
            request_id: payload.item.request_id.map(|id| id.value()),
            last_booking: payload.last_booking.map(Into::into),
            next_booking: payload.next_booking.map(Into::into),
            comments: payload.comments.into_iter().map(Into::into).collect(),
        }
    }
}

/// Body of `POST /items`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemBody {
    /// Display name; must not be blank.
    pub name: String,
    /// Description; must not be blank.
    pub description: String,
    /// Initial availability toggle.
    pub available: bool,
    /// Item request this listing answers; must exist when given.
    pub request_id: Option<i64>,
}

/// Body of `PATCH /items/{id}`; absent fields keep their stored value.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateItemBody {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement availability toggle.
    pub available: Option<bool>,
}

/// Body of `POST /items/{id}/comment`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CommentBody {
    /// Comment text; must not be blank.
    pub text: String,
}

/// Search text parameter for `GET /items/search`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct SearchParams {
    /// Text matched against name and description; blank yields no results.
    #[serde(default)]
    pub text: String,
}

/// List an item for the calling owner.
#[utoipa::path(
    post,
    path = "/items",
    request_body = CreateItemBody,
    params(("X-Sharer-User-Id" = i64, Header, description = "Acting user")),
    responses(
        (status = 200, description = "Item listed", body = ItemDto),
        (status = 400, description = "Blank name or description"),
        (status = 404, description = "Unknown owner or item request")
    ),
    tags = ["items"],
    operation_id = "createItem"
)]
#[post("/items")]
pub async fn create_item(
    request: HttpRequest,
    state: web::Data<HttpState>,
    body: web::Json<CreateItemBody>,
) -> ApiResult<web::Json<ItemDto>> {
    let owner_id = require_user_id(&request)?;
    let body = body.into_inner();
    let payload = state
        .items
        .create_item(CreateItemRequest {
            owner_id,
            name: body.name,
            description: body.description,
            available: body.available,
            request_id: body.request_id.map(crate::domain::RequestId::new),
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// Partially update an owned item.
#[utoipa::path(
    patch,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = i64, Header, description = "Acting user; must own the item")
    ),
    request_body = UpdateItemBody,
    responses(
        (status = 200, description = "Updated item", body = ItemDto),
        (status = 404, description = "No such item for this owner")
    ),
    tags = ["items"],
    operation_id = "updateItem"
)]
#[patch("/items/{id}")]
pub async fn update_item(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    body: web::Json<UpdateItemBody>,
) -> ApiResult<web::Json<ItemDto>> {
    let owner_id = require_user_id(&request)?;
    let body = body.into_inner();
    let payload = state
        .items
        .update_item(UpdateItemRequest {
            owner_id,
            item_id: ItemId::new(path.into_inner()),
            name: body.name,
            description: body.description,
            available: body.available,
        })
        .await?;
    Ok(web::Json(payload.into()))
}

/// Fetch one item; owners also see booking projections.
#[utoipa::path(
    get,
    path = "/items/{id}",
    params(
        ("id" = i64, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = i64, Header, description = "Viewing user")
    ),
    responses(
        (status = 200, description = "Item with comments", body = ItemDetailsDto),
        (status = 404, description = "No such item")
    ),
    tags = ["items"],
    operation_id = "getItem"
)]
#[get("/items/{id}")]
pub async fn get_item(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ItemDetailsDto>> {
    let viewer_id = require_user_id(&request)?;
    let payload = state
        .items
        .get_item(ItemId::new(path.into_inner()), viewer_id)
        .await?;
    Ok(web::Json(payload.into()))
}

/// The calling owner's items with projections, id ascending.
#[utoipa::path(
    get,
    path = "/items",
    params(
        PageParams,
        ("X-Sharer-User-Id" = i64, Header, description = "Owning user")
    ),
    responses(
        (status = 200, description = "Owner's items", body = [ItemDetailsDto]),
        (status = 404, description = "Unknown owner")
    ),
    tags = ["items"],
    operation_id = "listOwnerItems"
)]
#[get("/items")]
pub async fn list_owner_items(
    request: HttpRequest,
    state: web::Data<HttpState>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ItemDetailsDto>>> {
    let owner_id = require_user_id(&request)?;
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state.items.list_owner_items(owner_id, page).await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// Search available items by name or description.
#[utoipa::path(
    get,
    path = "/items/search",
    params(SearchParams, PageParams),
    responses((status = 200, description = "Matching available items", body = [ItemDto])),
    tags = ["items"],
    operation_id = "searchItems"
)]
#[get("/items/search")]
pub async fn search_items(
    state: web::Data<HttpState>,
    search: web::Query<SearchParams>,
    page: web::Query<PageParams>,
) -> ApiResult<web::Json<Vec<ItemDto>>> {
    let page = PageRequest::try_from(page.into_inner())?;
    let payloads = state
        .items
        .search_items(SearchItemsRequest {
            text: search.into_inner().text,
            page,
        })
        .await?;
    Ok(web::Json(payloads.into_iter().map(Into::into).collect()))
}

/// Comment on an item after a finished booking.
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    params(
        ("id" = i64, Path, description = "Item identifier"),
        ("X-Sharer-User-Id" = i64, Header, description = "Authoring user")
    ),
    request_body = CommentBody,
    responses(
        (status = 200, description = "Comment added", body = CommentDto),
        (status = 400, description = "Blank text or no finished booking"),
        (status = 404, description = "Unknown item or user")
    ),
    tags = ["items"],
    operation_id = "addComment"
)]
#[post("/items/{id}/comment")]
pub async fn add_comment(
    request: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    body: web::Json<CommentBody>,
) -> ApiResult<web::Json<CommentDto>> {
    let author_id = require_user_id(&request)?;
    let payload = state
        .items
        .add_comment(AddCommentRequest {
            author_id,
            item_id: ItemId::new(path.into_inner()),
            text: body.into_inner().text,
        })
        .await?;
    Ok(web::Json(payload.into()))
}
