//! Port for catalog item persistence.

use async_trait::async_trait;
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::{Item, ItemId, RequestId, UserId};

/// Errors surfaced by item repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemRepositoryError {
    /// Repository connection could not be established.
    #[error("item repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("item repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl ItemRepositoryError {
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

impl From<ItemRepositoryError> for crate::domain::Error {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::Connection { .. } => Self::service_unavailable(err.to_string()),
            ItemRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Persistence port for catalog items.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist an item, assigning an id on first insert and overwriting by id
    /// afterwards. Returns the stored record.
    async fn save(&self, item: &Item) -> Result<Item, ItemRepositoryError>;

    /// Fetch an item by identifier.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError>;

    /// An owner's items, id ascending, paged.
    async fn find_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Available items whose name or description contains `text`
    /// (case-insensitive), id ascending, paged. `text` is never blank here;
    /// the service short-circuits blank searches.
    async fn search_available(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemRepositoryError>;

    /// Items answering any of the given item requests.
    async fn find_by_request_ids(
        &self,
        request_ids: &[RequestId],
    ) -> Result<Vec<Item>, ItemRepositoryError>;
}
