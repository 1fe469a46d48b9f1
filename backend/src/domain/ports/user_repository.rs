//! Port for user persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{User, UserId};

/// Errors surfaced by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl UserRepositoryError {
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

// Connection loss means the store is temporarily gone; anything else is a
// bug surfaced as an internal error.
impl From<UserRepositoryError> for crate::domain::Error {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::Connection { .. } => Self::service_unavailable(err.to_string()),
            UserRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Persistence port for user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a user, assigning an id on first insert and overwriting by id
    /// afterwards. Returns the stored record.
    async fn save(&self, user: &User) -> Result<User, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact email, for uniqueness checks.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// All users, id ascending.
    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError>;

    /// Remove a user by identifier. Removing an absent id is a no-op.
    async fn delete_by_id(&self, id: UserId) -> Result<(), UserRepositoryError>;
}
