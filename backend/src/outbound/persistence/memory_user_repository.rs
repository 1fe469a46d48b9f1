//! In-memory user repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{User, UserId};

use super::memory::MemoryStore;

/// [`UserRepository`] over the shared [`MemoryStore`].
pub struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

impl MemoryUserRepository {
    /// Attach the repository to a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: &User) -> Result<User, UserRepositoryError> {
        let mut tables = self.store.write();
        let mut stored = user.clone();
        if !stored.id.is_assigned() {
            stored.id = tables.next_user_id();
        }
        tables.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.store.read().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        Ok(self
            .store
            .read()
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        // BTreeMap iteration is already id ascending.
        Ok(self.store.read().users.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: UserId) -> Result<(), UserRepositoryError> {
        self.store.write().users.remove(&id);
        Ok(())
    }
}
