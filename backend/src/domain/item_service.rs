//! Item catalog: listings, owner updates, search, detail projections, and
//! post-booking comments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use pagination::PageRequest;
use tracing::{info, warn};

use crate::domain::ports::{
    AddCommentRequest, BookingBrief, BookingRepository, CommentPayload, CommentRepository,
    CreateItemRequest, ItemDetailsPayload, ItemPayload, ItemRepository, ItemRequestRepository,
    ItemUseCases, SearchItemsRequest, UpdateItemRequest, UserRepository,
};
use crate::domain::{Comment, Error, Item, ItemId, User, UserId};

/// Implements [`ItemUseCases`] over the item, user, booking, comment and
/// item-request repositories.
///
/// Booking projections on detail views come from the booking repository and
/// are evaluated at the injected clock's "now".
pub struct ItemCatalogService<I, U, B, C, R> {
    items: Arc<I>,
    users: Arc<U>,
    bookings: Arc<B>,
    comments: Arc<C>,
    requests: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<I, U, B, C, R> ItemCatalogService<I, U, B, C, R> {
    /// Create the service over its repositories and clock.
    pub fn new(
        items: Arc<I>,
        users: Arc<U>,
        bookings: Arc<B>,
        comments: Arc<C>,
        requests: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            items,
            users,
            bookings,
            comments,
            requests,
            clock,
        }
    }
}

impl<I, U, B, C, R> ItemCatalogService<I, U, B, C, R>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user with id={user_id} not found")))
    }

    async fn require_item(&self, item_id: ItemId) -> Result<Item, Error> {
        self.items
            .find_by_id(item_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("item with id={item_id} not found")))
    }

    /// Join comments with their authors' display names. Author lookups are
    /// cached per call since one user often comments across items.
    async fn project_comments(
        &self,
        comments: Vec<Comment>,
    ) -> Result<HashMap<ItemId, Vec<CommentPayload>>, Error> {
        let mut names: HashMap<UserId, String> = HashMap::new();
        let mut grouped: HashMap<ItemId, Vec<CommentPayload>> = HashMap::new();
        for comment in comments {
            if !names.contains_key(&comment.author_id) {
                let author = self
                    .users
                    .find_by_id(comment.author_id)
                    .await?
                    .ok_or_else(|| {
                        Error::internal(format!(
                            "comment with id={} references missing user with id={}",
                            comment.id, comment.author_id
                        ))
                    })?;
                names.insert(comment.author_id, author.name);
            }
            let author_name = names
                .get(&comment.author_id)
                .cloned()
                .unwrap_or_default();
            grouped.entry(comment.item_id).or_default().push(CommentPayload {
                id: comment.id,
                text: comment.text,
                author_name,
                created: comment.created,
            });
        }
        Ok(grouped)
    }

    /// Assemble detail views for the given items. Booking projections are
    /// attached only when `for_owner` holds.
    async fn project_details(
        &self,
        items: Vec<Item>,
        for_owner: bool,
    ) -> Result<Vec<ItemDetailsPayload>, Error> {
        let ids: Vec<ItemId> = items.iter().map(|item| item.id).collect();
        let now = self.clock.utc();

        let (mut last, mut next) = if for_owner {
            (
                self.bookings.find_last_for_items(&ids, now).await?,
                self.bookings.find_next_for_items(&ids, now).await?,
            )
        } else {
            (HashMap::new(), HashMap::new())
        };
        let mut comments = self
            .project_comments(self.comments.find_by_items(&ids).await?)
            .await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let id = item.id;
                ItemDetailsPayload {
                    item: item.into(),
                    last_booking: last.remove(&id).as_ref().map(BookingBrief::from),
                    next_booking: next.remove(&id).as_ref().map(BookingBrief::from),
                    comments: comments.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }
}

#[async_trait]
impl<I, U, B, C, R> ItemUseCases for ItemCatalogService<I, U, B, C, R>
where
    I: ItemRepository,
    U: UserRepository,
    B: BookingRepository,
    C: CommentRepository,
    R: ItemRequestRepository,
{
    async fn create_item(&self, request: CreateItemRequest) -> Result<ItemPayload, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("item name must not be blank"));
        }
        if request.description.trim().is_empty() {
            return Err(Error::invalid_request("item description must not be blank"));
        }
        let owner = self.require_user(request.owner_id).await?;
        if let Some(request_id) = request.request_id {
            self.requests.find_by_id(request_id).await?.ok_or_else(|| {
                Error::not_found(format!("item request with id={request_id} not found"))
            })?;
        }
        let saved = self
            .items
            .save(&Item::new(
                request.name,
                request.description,
                request.available,
                owner.id,
                request.request_id,
            ))
            .await?;
        info!(item_id = %saved.id, owner_id = %owner.id, "item listed");
        Ok(saved.into())
    }

    async fn update_item(&self, request: UpdateItemRequest) -> Result<ItemPayload, Error> {
        let mut item = self.require_item(request.item_id).await?;
        if item.owner_id != request.owner_id {
            // Non-owners learn nothing beyond "no such item".
            warn!(item_id = %item.id, acting_user = %request.owner_id, "update refused: not the owner");
            return Err(Error::not_found(format!(
                "item with id={} not found for owner with id={}",
                request.item_id, request.owner_id
            )));
        }
        if let Some(name) = request.name {
            item.name = name;
        }
        if let Some(description) = request.description {
            item.description = description;
        }
        if let Some(available) = request.available {
            item.available = available;
        }
        let saved = self.items.save(&item).await?;
        info!(item_id = %saved.id, "item updated");
        Ok(saved.into())
    }

    async fn get_item(
        &self,
        item_id: ItemId,
        viewer_id: UserId,
    ) -> Result<ItemDetailsPayload, Error> {
        let item = self.require_item(item_id).await?;
        let for_owner = item.owner_id == viewer_id;
        let mut details = self.project_details(vec![item], for_owner).await?;
        details
            .pop()
            .ok_or_else(|| Error::internal("detail projection produced no rows"))
    }

    async fn list_owner_items(
        &self,
        owner_id: UserId,
        page: PageRequest,
    ) -> Result<Vec<ItemDetailsPayload>, Error> {
        self.require_user(owner_id).await?;
        let items = self.items.find_by_owner(owner_id, page).await?;
        self.project_details(items, true).await
    }

    async fn search_items(&self, request: SearchItemsRequest) -> Result<Vec<ItemPayload>, Error> {
        // Blank search text short-circuits; the repository never sees it.
        if request.text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let items = self
            .items
            .search_available(&request.text, request.page)
            .await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    async fn add_comment(&self, request: AddCommentRequest) -> Result<CommentPayload, Error> {
        if request.text.trim().is_empty() {
            return Err(Error::invalid_request("comment text must not be blank"));
        }
        let author = self.require_user(request.author_id).await?;
        let item = self.require_item(request.item_id).await?;

        let now = self.clock.utc();
        let finished = self
            .bookings
            .find_finished(item.id, author.id, now)
            .await?;
        if finished.is_none() {
            warn!(item_id = %item.id, author_id = %author.id, "comment refused: no finished booking");
            return Err(Error::not_available(format!(
                "user with id={} has no finished booking of item with id={}",
                author.id, item.id
            )));
        }

        let saved = self
            .comments
            .save(&Comment::new(request.text, item.id, author.id, now))
            .await?;
        info!(comment_id = %saved.id, item_id = %item.id, "comment added");
        Ok(CommentPayload {
            id: saved.id,
            text: saved.text,
            author_name: author.name,
            created: saved.created,
        })
    }
}

#[cfg(test)]
#[path = "item_service_tests.rs"]
mod tests;
