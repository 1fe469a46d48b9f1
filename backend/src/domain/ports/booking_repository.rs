//! Port for booking persistence and the query shapes the engine needs.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;
use thiserror::Error;

use crate::domain::{Booking, BookingId, BookingWindow, ItemId, TemporalFilter, UserId};

/// Errors surfaced by booking repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingRepositoryError {
    /// Repository connection could not be established.
    #[error("booking repository connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("booking repository query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl BookingRepositoryError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

impl From<BookingRepositoryError> for crate::domain::Error {
    fn from(err: BookingRepositoryError) -> Self {
        match err {
            BookingRepositoryError::Connection { .. } => Self::service_unavailable(err.to_string()),
            BookingRepositoryError::Query { .. } => Self::internal(err.to_string()),
        }
    }
}

/// Persistence port for bookings.
///
/// List queries take the temporal filter, the evaluation instant and the page
/// so the adapter owns ordering; every ordering is total (`id` descending
/// breaks ties) to keep pagination stable. Owner-scoped queries resolve
/// ownership through the item the booking references, not a booking field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a booking, assigning an id on first insert and overwriting by
    /// id afterwards. Returns the stored record.
    async fn save(&self, booking: &Booking) -> Result<Booking, BookingRepositoryError>;

    /// Fetch a booking by identifier.
    async fn find_by_id(&self, id: BookingId) -> Result<Option<Booking>, BookingRepositoryError>;

    /// First approved booking of the item overlapping the window, if any.
    /// Existence check; which overlapping booking comes back is unspecified.
    async fn find_approved_overlap(
        &self,
        item_id: ItemId,
        window: BookingWindow,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// A booker's bookings matching the filter at `now`, start descending.
    async fn find_by_booker(
        &self,
        booker_id: UserId,
        filter: TemporalFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Bookings of items owned by `owner_id` matching the filter at `now`,
    /// start descending — except `Current`, which orders by id descending
    /// (legacy ordering preserved for owner dashboards).
    async fn find_by_item_owner(
        &self,
        owner_id: UserId,
        filter: TemporalFilter,
        now: DateTime<Utc>,
        page: PageRequest,
    ) -> Result<Vec<Booking>, BookingRepositoryError>;

    /// Per item, the latest approved booking starting at or before `now`.
    async fn find_last_for_items(
        &self,
        item_ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<HashMap<ItemId, Booking>, BookingRepositoryError>;

    /// Per item, the earliest approved booking starting after `now`.
    async fn find_next_for_items(
        &self,
        item_ids: &[ItemId],
        now: DateTime<Utc>,
    ) -> Result<HashMap<ItemId, Booking>, BookingRepositoryError>;

    /// Any booking of the item by this booker that ended before `now`.
    /// Gates comment authorship.
    async fn find_finished(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<Option<Booking>, BookingRepositoryError>;

    /// Whether the user participates in any booking, as booker or as owner
    /// of the booked item. Gates user deletion.
    async fn exists_for_participant(
        &self,
        user_id: UserId,
    ) -> Result<bool, BookingRepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_format_their_message() {
        let err = BookingRepositoryError::connection("store gone");
        assert_eq!(
            err.to_string(),
            "booking repository connection failed: store gone"
        );
    }
}
