//! Driving port for item requests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Error, ItemRequest, RequestId, UserId};

use super::item_use_cases::ItemPayload;

/// Request to file a wish for an unlisted item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemRequest {
    /// The filing user.
    pub requester_id: UserId,
    /// What the requester is looking for.
    pub description: String,
}

/// Item request view with the items answering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequestPayload {
    /// Request identifier.
    pub id: RequestId,
    /// Request description.
    pub description: String,
    /// The filing user.
    pub requester_id: UserId,
    /// Creation instant.
    pub created: DateTime<Utc>,
    /// Items listed in answer to this request.
    pub items: Vec<ItemPayload>,
}

impl ItemRequestPayload {
    /// Join a request with its answering items.
    pub fn project(request: ItemRequest, items: Vec<ItemPayload>) -> Self {
        Self {
            id: request.id,
            description: request.description,
            requester_id: request.requester_id,
            created: request.created,
            items,
        }
    }
}

/// Use-case port for item requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestUseCases: Send + Sync {
    /// File a new item request.
    async fn create_request(&self, request: NewItemRequest)
        -> Result<ItemRequestPayload, Error>;

    /// The user's own requests, newest first, paged.
    async fn list_own_requests(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestPayload>, Error>;

    /// Everyone else's requests, newest first, paged.
    async fn list_other_requests(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestPayload>, Error>;

    /// One request with its answering items.
    async fn get_request(
        &self,
        request_id: RequestId,
        user_id: UserId,
    ) -> Result<ItemRequestPayload, Error>;
}
