//! User account management: registration, updates, and guarded deletion.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{
    BookingRepository, CreateUserRequest, UpdateUserRequest, UserPayload, UserRepository,
    UserUseCases,
};
use crate::domain::{Error, User, UserId};

/// Light shape check; full address validation is deliberately out of scope.
fn validate_email(email: &str) -> Result<(), Error> {
    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        return Err(Error::invalid_request(format!(
            "email {email:?} is not a valid address"
        )));
    }
    Ok(())
}

/// Implements [`UserUseCases`] over the user repository, consulting the
/// booking repository only to guard deletion.
pub struct UserAccountService<U, B> {
    users: Arc<U>,
    bookings: Arc<B>,
}

impl<U, B> UserAccountService<U, B> {
    /// Create the service over its repositories.
    pub fn new(users: Arc<U>, bookings: Arc<B>) -> Self {
        Self { users, bookings }
    }
}

impl<U, B> UserAccountService<U, B>
where
    U: UserRepository,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user with id={user_id} not found")))
    }

    /// Reject an email already held by a different user.
    async fn require_email_free(&self, email: &str, holder: UserId) -> Result<(), Error> {
        if let Some(existing) = self.users.find_by_email(email).await? {
            if existing.id != holder {
                warn!(email, "email already registered");
                return Err(Error::conflict(format!(
                    "email {email} is already registered"
                )));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U, B> UserUseCases for UserAccountService<U, B>
where
    U: UserRepository,
    B: BookingRepository,
{
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserPayload, Error> {
        validate_email(&request.email)?;
        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("user name must not be blank"));
        }
        self.require_email_free(&request.email, UserId::default())
            .await?;
        let saved = self
            .users
            .save(&User::new(request.name, request.email))
            .await?;
        info!(user_id = %saved.id, "user registered");
        Ok(saved.into())
    }

    async fn get_user(&self, user_id: UserId) -> Result<UserPayload, Error> {
        self.require_user(user_id).await.map(Into::into)
    }

    async fn update_user(&self, request: UpdateUserRequest) -> Result<UserPayload, Error> {
        let mut user = self.require_user(request.user_id).await?;
        if let Some(email) = request.email {
            validate_email(&email)?;
            if email != user.email {
                self.require_email_free(&email, user.id).await?;
            }
            user.email = email;
        }
        if let Some(name) = request.name {
            user.name = name;
        }
        let saved = self.users.save(&user).await?;
        info!(user_id = %saved.id, "user updated");
        Ok(saved.into())
    }

    async fn list_users(&self) -> Result<Vec<UserPayload>, Error> {
        let users = self.users.find_all().await?;
        Ok(users.into_iter().map(Into::into).collect())
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), Error> {
        self.require_user(user_id).await?;
        // Bookings reference users by id; deletion would strand them.
        if self.bookings.exists_for_participant(user_id).await? {
            warn!(user_id = %user_id, "deletion refused: user participates in bookings");
            return Err(Error::conflict(format!(
                "user with id={user_id} still participates in bookings"
            )));
        }
        self.users.delete_by_id(user_id).await?;
        info!(user_id = %user_id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
