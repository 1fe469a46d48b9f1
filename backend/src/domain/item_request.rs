//! Requests for items that do not exist in the catalog yet.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Stable item-request identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct RequestId(i64);

impl RequestId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Underlying numeric value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A wish for an item nobody has listed yet. Items may reference the request
/// they fulfil; the linkage is read-only from the booking engine's viewpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRequest {
    /// Store-assigned identifier.
    pub id: RequestId,
    /// What the requester is looking for.
    pub description: String,
    /// The user who filed the request.
    pub requester_id: UserId,
    /// Creation instant, stamped from the injected clock.
    pub created: DateTime<Utc>,
}

impl ItemRequest {
    /// Build an unpersisted request; the repository assigns the id on save.
    pub fn new(description: impl Into<String>, requester_id: UserId, created: DateTime<Utc>) -> Self {
        Self {
            id: RequestId::default(),
            description: description.into(),
            requester_id,
            created,
        }
    }
}
