//! In-memory comment repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, ItemId};

use super::memory::MemoryStore;

/// [`CommentRepository`] over the shared [`MemoryStore`].
pub struct MemoryCommentRepository {
    store: Arc<MemoryStore>,
}

impl MemoryCommentRepository {
    /// Attach the repository to a store.
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CommentRepository for MemoryCommentRepository {
    async fn save(&self, comment: &Comment) -> Result<Comment, CommentRepositoryError> {
        let mut tables = self.store.write();
        let mut stored = comment.clone();
        if stored.id.value() == 0 {
            stored.id = tables.next_comment_id();
        }
        tables.comments.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_items(
        &self,
        item_ids: &[ItemId],
    ) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut comments: Vec<Comment> = self
            .store
            .read()
            .comments
            .values()
            .filter(|comment| item_ids.contains(&comment.item_id))
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created, comment.id));
        Ok(comments)
    }
}
