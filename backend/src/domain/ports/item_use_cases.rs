//! Driving port for catalog item management and comments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Booking, BookingId, Error, Item, ItemId, RequestId, UserId};

/// Request to list a new item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateItemRequest {
    /// The listing user.
    pub owner_id: UserId,
    /// Short display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// Initial availability toggle.
    pub available: bool,
    /// Item request this listing answers, if any; must exist.
    pub request_id: Option<RequestId>,
}

/// Partial item update; `None` fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateItemRequest {
    /// The acting user; must own the item.
    pub owner_id: UserId,
    /// The item to update.
    pub item_id: ItemId,
    /// Replacement name, if supplied.
    pub name: Option<String>,
    /// Replacement description, if supplied.
    pub description: Option<String>,
    /// Replacement availability toggle, if supplied.
    pub available: Option<bool>,
}

/// Request to comment on an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    /// The authoring user; must have a finished booking of the item.
    pub author_id: UserId,
    /// The commented item.
    pub item_id: ItemId,
    /// Comment body.
    pub text: String,
}

/// Request to search available items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchItemsRequest {
    /// Search text; blank short-circuits to an empty result.
    pub text: String,
    /// Result window.
    pub page: PageRequest,
}

/// Item view returned to adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPayload {
    /// Item identifier.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Availability toggle.
    pub available: bool,
    /// Owning user.
    pub owner_id: UserId,
    /// Fulfilled item request, if any.
    pub request_id: Option<RequestId>,
}

impl From<Item> for ItemPayload {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            owner_id: item.owner_id,
            request_id: item.request_id,
        }
    }
}

/// Abbreviated booking shown on an owner's item view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingBrief {
    /// Booking identifier.
    pub id: BookingId,
    /// The booking user.
    pub booker_id: UserId,
    /// Window start.
    pub start: DateTime<Utc>,
    /// Window end.
    pub end: DateTime<Utc>,
}

impl From<&Booking> for BookingBrief {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id(),
            booker_id: booking.booker_id(),
            start: booking.window().start(),
            end: booking.window().end(),
        }
    }
}

/// Comment view with the author's name joined in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentPayload {
    /// Comment identifier.
    pub id: crate::domain::CommentId,
    /// Comment body.
    pub text: String,
    /// Author display name at projection time.
    pub author_name: String,
    /// Creation instant.
    pub created: DateTime<Utc>,
}

/// Item view enriched with comments and, for the owner, booking projections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetailsPayload {
    /// The item itself.
    pub item: ItemPayload,
    /// Latest approved booking starting at or before now; owner view only.
    pub last_booking: Option<BookingBrief>,
    /// Earliest approved booking starting after now; owner view only.
    pub next_booking: Option<BookingBrief>,
    /// Comments on the item, oldest first.
    pub comments: Vec<CommentPayload>,
}

/// Use-case port for the item catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemUseCases: Send + Sync {
    /// List a new item for its owner.
    async fn create_item(&self, request: CreateItemRequest) -> Result<ItemPayload, Error>;

    /// Apply a partial update; non-owners are told the item does not exist.
    async fn update_item(&self, request: UpdateItemRequest) -> Result<ItemPayload, Error>;

    /// Fetch one item with comments; the owner also sees booking projections.
    async fn get_item(
        &self,
        item_id: ItemId,
        viewer_id: UserId,
    ) -> Result<ItemDetailsPayload, Error>;

    /// The owner's items with projections and comments, id ascending, paged.
    async fn list_owner_items(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemDetailsPayload>, Error>;

    /// Search available items by name or description.
    async fn search_items(&self, request: SearchItemsRequest) -> Result<Vec<ItemPayload>, Error>;

    /// Comment on an item after a finished booking.
    async fn add_comment(&self, request: AddCommentRequest) -> Result<CommentPayload, Error>;
}
