//! Comments left on items by past bookers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::ItemId;
use super::user::UserId;

/// Stable comment identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct CommentId(i64);

impl CommentId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Underlying numeric value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment on an item. Only users with a booking of the item that already
/// ended may author one; the service enforces that rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Store-assigned identifier.
    pub id: CommentId,
    /// Comment body.
    pub text: String,
    /// Commented item.
    pub item_id: ItemId,
    /// Authoring user.
    pub author_id: UserId,
    /// Creation instant, stamped from the injected clock.
    pub created: DateTime<Utc>,
}

impl Comment {
    /// Build an unpersisted comment; the repository assigns the id on save.
    pub fn new(
        text: impl Into<String>,
        item_id: ItemId,
        author_id: UserId,
        created: DateTime<Utc>,
    ) -> Self {
        Self {
            id: CommentId::default(),
            text: text.into(),
            item_id,
            author_id,
            created,
        }
    }
}
