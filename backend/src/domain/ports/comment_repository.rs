//! Port for comment persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Comment, ItemId};

/// Errors surfaced by comment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommentRepositoryError {
    /// Repository connection could not be established.
    #[error("comment repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("comment repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl CommentRepositoryError {
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

impl From<CommentRepositoryError> for crate::domain::Error {
    fn from(err: CommentRepositoryError) -> Self {
        match err {
            CommentRepositoryError::Connection { .. } => Self::service_unavailable(err.to_string()),
            CommentRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Persistence port for item comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a comment, assigning an id on first insert. Returns the
    /// stored record.
    async fn save(&self, comment: &Comment) -> Result<Comment, CommentRepositoryError>;

    /// Comments on any of the given items, oldest first.
    async fn find_by_items(
        &self,
        item_ids: &[ItemId],
    ) -> Result<Vec<Comment>, CommentRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_format_their_message() {
        let err = CommentRepositoryError::connection("store gone");
        assert_eq!(
            err.to_string(),
            "comment repository connection failed: store gone"
        );
    }
}
