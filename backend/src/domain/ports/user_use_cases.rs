//! Driving port for user account management.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Request to register a new user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Contact email, unique across users.
    pub email: String,
}

/// Partial update; `None` fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// The user to update.
    pub user_id: UserId,
    /// Replacement display name, if supplied.
    pub name: Option<String>,
    /// Replacement email, if supplied; re-checked for uniqueness.
    pub email: Option<String>,
}

/// User view returned to adapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload {
    /// User identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Use-case port for user CRUD.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserUseCases: Send + Sync {
    /// Register a user; duplicate emails are a conflict.
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserPayload, Error>;

    /// Fetch a user by id.
    async fn get_user(&self, user_id: UserId) -> Result<UserPayload, Error>;

    /// Apply a partial update.
    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserPayload, Error>;

    /// All users, id ascending.
    async fn list_users(&self) -> Result<Vec<UserPayload>, Error>;

    /// Delete a user; denied while the user participates in any booking.
    async fn delete_user(&self, user_id: UserId) -> Result<(), Error>;
}
