//! In-memory item-request repository.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::ports::{ItemRequestRepository, ItemRequestRepositoryError};
use crate::domain::{ItemRequest, RequestId, UserId};

use super::memory::MemoryStore;

/// [`ItemRequestRepository`] over the shared [`MemoryStore`].
pub struct MemoryItemRequestRepository {
    store: Arc<MemoryStore>,
}

impl MemoryItemRequestRepository {
    /// Attach the repository to a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }

    fn newest_first(
        &self,
        keep: impl Fn(&ItemRequest) -> bool,
        page: PageRequest,
    ) -> Vec<ItemRequest> {
        let mut requests: Vec<ItemRequest> = self
            .store
            .read()
            .requests
            .values()
            .filter(|request| keep(request))
            .cloned()
            .collect();
        requests.sort_by_key(|request| Reverse((request.created, request.id)));
        page.apply(requests)
    }
}

#[async_trait]
impl ItemRequestRepository for MemoryItemRequestRepository {
    async fn save(
        &self,
        request: &ItemRequest,
    ) -> Result<ItemRequest, ItemRequestRepositoryError> {
        let mut tables = self.store.write();
        let mut stored = request.clone();
        if stored.id.value() == 0 {
            stored.id = tables.next_request_id();
        }
        tables.requests.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(
        &self,
        id: RequestId,
    ) -> Result<Option<ItemRequest>, ItemRequestRepositoryError> {
        Ok(self.store.read().requests.get(&id).cloned())
    }

    async fn find_by_requester(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestRepositoryError> {
        Ok(self.newest_first(|request| request.requester_id == requester_id, page))
    }

    async fn find_by_other_requesters(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequest>, ItemRequestRepositoryError> {
        Ok(self.newest_first(|request| request.requester_id != requester_id, page))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    const FILER: UserId = UserId::new(2);
    const OTHER: UserId = UserId::new(3);

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[tokio::test]
    async fn listings_split_by_requester_and_order_newest_first() {
        let repo = MemoryItemRequestRepository::new(Arc::new(MemoryStore::new()));
        let page = PageRequest::try_new(0, 10).expect("valid page");

        let old = repo
            .save(&ItemRequest::new("need a drill", FILER, at(8)))
            .await
            .expect("insert");
        let new = repo
            .save(&ItemRequest::new("need a saw", FILER, at(10)))
            .await
            .expect("insert");
        let foreign = repo
            .save(&ItemRequest::new("need a ladder", OTHER, at(9)))
            .await
            .expect("insert");

        let own = repo
            .find_by_requester(FILER, page)
            .await
            .expect("own listing");
        let ids: Vec<RequestId> = own.iter().map(|request| request.id).collect();
        assert_eq!(ids, [new.id, old.id]);

        let others = repo
            .find_by_other_requesters(FILER, page)
            .await
            .expect("other listing");
        let ids: Vec<RequestId> = others.iter().map(|request| request.id).collect();
        assert_eq!(ids, [foreign.id]);
    }

    #[tokio::test]
    async fn equal_created_instants_break_ties_by_id_descending() {
        let repo = MemoryItemRequestRepository::new(Arc::new(MemoryStore::new()));
        let page = PageRequest::try_new(0, 10).expect("valid page");

        let first = repo
            .save(&ItemRequest::new("need a drill", FILER, at(9)))
            .await
            .expect("insert");
        let second = repo
            .save(&ItemRequest::new("need a saw", FILER, at(9)))
            .await
            .expect("insert");

        let own = repo
            .find_by_requester(FILER, page)
            .await
            .expect("own listing");
        let ids: Vec<RequestId> = own.iter().map(|request| request.id).collect();
        assert_eq!(ids, [second.id, first.id]);
    }
}
