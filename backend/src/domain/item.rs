//! Catalog item listed for sharing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::item_request::RequestId;
use super::user::UserId;

/// Stable item identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ItemId(i64);

impl ItemId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Underlying numeric value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An item offered for booking.
///
/// `available` is a coarse owner-controlled toggle and is independent of
/// booking occupancy: an available item can still clash temporally with an
/// approved booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Store-assigned identifier.
    pub id: ItemId,
    /// Short display name.
    pub name: String,
    /// Free-text description, searched alongside the name.
    pub description: String,
    /// Owner-controlled booking toggle.
    pub available: bool,
    /// The listing user; sole authority over bookings of this item.
    pub owner_id: UserId,
    /// Item request this listing fulfils, if any.
    pub request_id: Option<RequestId>,
}

impl Item {
    /// Build an unpersisted item; the repository assigns the id on save.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        available: bool,
        owner_id: UserId,
        request_id: Option<RequestId>,
    ) -> Self {
        Self {
            id: ItemId::default(),
            name: name.into(),
            description: description.into(),
            available,
            owner_id,
            request_id,
        }
    }
}
