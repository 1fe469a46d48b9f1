//! Shared in-memory store backing the repository adapters.
//!
//! One `RwLock` guards all tables so adapters observe a consistent snapshot
//! per call. Identifiers are monotonic per table and never reused, matching
//! the contract that a store-assigned id stays stable for the record's life.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    Booking, BookingId, Comment, CommentId, Item, ItemId, ItemRequest, RequestId, User, UserId,
};

/// All tables plus the id counters that feed them.
#[derive(Debug, Default)]
pub(crate) struct Tables {
    pub users: BTreeMap<UserId, User>,
    pub items: BTreeMap<ItemId, Item>,
    pub bookings: BTreeMap<BookingId, Booking>,
    pub requests: BTreeMap<RequestId, ItemRequest>,
    pub comments: BTreeMap<CommentId, Comment>,
    next_user_id: i64,
    next_item_id: i64,
    next_booking_id: i64,
    next_request_id: i64,
    next_comment_id: i64,
}

impl Tables {
    pub fn next_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }

    pub fn next_item_id(&mut self) -> ItemId {
        self.next_item_id += 1;
        ItemId::new(self.next_item_id)
    }

    pub fn next_booking_id(&mut self) -> BookingId {
        self.next_booking_id += 1;
        BookingId::new(self.next_booking_id)
    }

    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request_id += 1;
        RequestId::new(self.next_request_id)
    }

    pub fn next_comment_id(&mut self) -> CommentId {
        self.next_comment_id += 1;
        CommentId::new(self.next_comment_id)
    }
}

/// Process-local store shared by every memory repository.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another test thread panicked mid-write;
    // the data itself is still coherent for these single-step mutations.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }
}
