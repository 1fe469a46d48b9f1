//! Port for item-request persistence.

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::{ItemRequest, RequestId, UserId};

/// Errors surfaced by item-request repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemRequestRepositoryError {
    /// Repository connection could not be established.
    #[error("item request repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("item request repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl ItemRequestRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<ItemRequestRepositoryError> for crate::domain::Error {
    fn from(err: ItemRequestRepositoryError) -> Self {
        match err {
            ItemRequestRepositoryError::Connection { .. } => {
                Self::service_unavailable(err.to_string())
            }
            ItemRequestRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Persistence port for item requests. Listings order newest first
/// (`created` descending, id descending tie-break).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRequestRepository: Send + Sync {
    /// Persist a request, assigning an id on first insert. Returns the
    /// stored record.
    async fn save(&self, request: &ItemRequest)
        -> Result<ItemRequest, ItemRequestRepositoryError>;

    /// Fetch a request by identifier.
    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ItemRequest>, ItemRequestRepositoryError>;

    /// Requests filed by this user, newest first, paged.
    async fn find_by_requester(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestRepositoryError>;

    /// Requests filed by everyone else, newest first, paged.
    async fn find_by_other_requesters(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_format_their_message() {
        let err = ItemRequestRepositoryError::query("bad page");
        assert_eq!(
            err.to_string(),
            "item request repository query failed: bad page"
        );
    }
}
