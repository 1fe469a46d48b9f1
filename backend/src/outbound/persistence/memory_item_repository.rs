//! In-memory item repository.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{ItemRepository, ItemRepositoryError};
use crate::domain::{Item, ItemId, RequestId, UserId};

use super::memory::MemoryStore;

/// [`ItemRepository`] over the shared [`MemoryStore`]. Every listing is id
/// ascending, which the backing `BTreeMap` gives for free.
pub struct MemoryItemRepository {
    store: Arc<MemoryStore>,
}

impl MemoryItemRepository {
    /// Attach the repository to a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ItemRepository for MemoryItemRepository {
    async fn save(&self, item: &Item) -> Result<Item, ItemRepositoryError> {
        let mut tables = self.store.write();
        let mut stored = item.clone();
        if stored.id.value() == 0 {
            stored.id = tables.next_item_id();
        }
        tables.items.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemRepositoryError> {
        Ok(self.store.read().items.get(&id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(page.apply(
            self.store
                .read()
                .items
                .values()
                .filter(|item| item.owner_id == owner_id)
                .cloned(),
        ))
    }

    async fn search_available(
        &self,
        text: &str,
        page: PageRequest,
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        let needle = text.to_lowercase();
        Ok(page.apply(
            self.store
                .read()
                .items
                .values()
                .filter(|item| {
                    item.available
                        && (item.name.to_lowercase().contains(&needle)
                            || item.description.to_lowercase().contains(&needle))
                })
                .cloned(),
        ))
    }

    async fn find_by_request_ids(
        &self,
        request_ids: &[RequestId],
    ) -> Result<Vec<Item>, ItemRepositoryError> {
        Ok(self
            .store
            .read()
            .items
            .values()
            .filter(|item| {
                item.request_id
                    .is_some_and(|request_id| request_ids.contains(&request_id))
            })
            .cloned()
            .collect())
    }
}
