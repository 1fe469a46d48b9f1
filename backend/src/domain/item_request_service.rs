//! Item requests: wishes for items nobody has listed yet, joined with the
//! items later offered in answer.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::info;

use crate::domain::ports::{
    ItemPayload, ItemRepository, ItemRequestPayload, ItemRequestRepository, ItemRequestUseCases,
    NewItemRequest, UserRepository,
};
use crate::domain::{Error, ItemRequest, RequestId, UserId};

/// Implements [`ItemRequestUseCases`]; the item repository supplies the
/// answering items for each request view.
pub struct ItemRequestService<R, I, U> {
    requests: Arc<R>,
    items: Arc<I>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<R, I, U> ItemRequestService<R, I, U> {
    /// Create the service over its repositories and clock.
    pub fn new(requests: Arc<R>, items: Arc<I>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            requests,
            items,
            users,
            clock,
        }
    }
}

impl<R, I, U> ItemRequestService<R, I, U>
where
    R: ItemRequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    async fn require_user(&self, user_id: UserId) -> Result<(), Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("user with id={user_id} not found")))
    }

    /// Join each request with the items answering it, preserving the
    /// repository's ordering.
    async fn project_all(
        &self,
        requests: Vec<ItemRequest>,
    ) -> Result<Vec<ItemRequestPayload>, Error> {
        let ids: Vec<RequestId> = requests.iter().map(|request| request.id).collect();
        let mut answers: HashMap<RequestId, Vec<ItemPayload>> = HashMap::new();
        for item in self.items.find_by_request_ids(&ids).await? {
            if let Some(request_id) = item.request_id {
                answers.entry(request_id).or_default().push(item.into());
            }
        }
        Ok(requests
            .into_iter()
            .map(|request| {
                let items = answers.remove(&request.id).unwrap_or_default();
                ItemRequestPayload::project(request, items)
            })
            .collect())
    }
}

#[async_trait]
impl<R, I, U> ItemRequestUseCases for ItemRequestService<R, I, U>
where
    R: ItemRequestRepository,
    I: ItemRepository,
    U: UserRepository,
{
    async fn create_request(
        &self,
        request: NewItemRequest,
    ) -> Result<ItemRequestPayload, Error> {
        if request.description.trim().is_empty() {
            return Err(Error::invalid_request(
                "item request description must not be blank",
            ));
        }
        self.require_user(request.requester_id).await?;
        let saved = self
            .requests
            .save(&ItemRequest::new(
                request.description,
                request.requester_id,
                self.clock.utc(),
            ))
            .await?;
        info!(request_id = %saved.id, requester_id = %saved.requester_id, "item request filed");
        // A fresh request has no answering items yet.
        Ok(ItemRequestPayload::project(saved, Vec::new()))
    }

    async fn list_own_requests(
        &self,
        requester_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestPayload>, Error> {
        self.require_user(requester_id).await?;
        let requests = self.requests.find_by_requester(requester_id, page).await?;
        self.project_all(requests).await
    }

    async fn list_other_requests(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemRequestPayload>, Error> {
        self.require_user(user_id).await?;
        let requests = self
            .requests
            .find_by_other_requesters(user_id, page)
            .await?;
        self.project_all(requests).await
    }

    async fn get_request(
        &self,
        request_id: RequestId,
        user_id: UserId,
    ) -> Result<ItemRequestPayload, Error> {
        self.require_user(user_id).await?;
        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!("item request with id={request_id} not found"))
            })?;
        let mut payloads = self.project_all(vec![request]).await?;
        payloads
            .pop()
            .ok_or_else(|| Error::internal("request projection produced no rows"))
    }
}

#[cfg(test)]
#[path = "item_request_service_tests.rs"]
mod tests;
