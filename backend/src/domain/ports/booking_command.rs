//! Driving port for booking mutations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BookingId, Error, ItemId, UserId};

use super::booking_payload::BookingPayload;

/// Request to book an item for a time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateBookingRequest {
    /// The user requesting the booking.
    pub booker_id: UserId,
    /// The item to book.
    pub item_id: ItemId,
    /// Requested window start.
    pub start: DateTime<Utc>,
    /// Requested window end, strictly after `start`.
    pub end: DateTime<Utc>,
}

/// Owner's decision on a waiting booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecideBookingRequest {
    /// The booking to decide.
    pub booking_id: BookingId,
    /// The acting user; must own the booked item.
    pub acting_owner_id: UserId,
    /// `true` approves, `false` rejects.
    pub approve: bool,
}

/// Use-case port for creating and deciding bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingCommand: Send + Sync {
    /// Validate and persist a new booking in `Waiting` status.
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingPayload, Error>;

    /// Approve or reject a waiting booking.
    async fn decide_booking(
        &self,
        request: DecideBookingRequest,
    ) -> Result<BookingPayload, Error>;
}
