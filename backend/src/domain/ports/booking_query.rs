//! Driving port for booking lookups and role-scoped listings.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{BookingId, Error, TemporalFilter, UserId};

use super::booking_payload::BookingPayload;

/// Request for a single booking, scoped to the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetBookingRequest {
    /// The booking to fetch.
    pub booking_id: BookingId,
    /// The requesting user; must be the booker or the item owner.
    pub user_id: UserId,
}

/// Request for a filtered, paged booking listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBookingsRequest {
    /// The user whose bookings (or whose items' bookings) to list.
    pub user_id: UserId,
    /// Temporal/status narrowing, evaluated at call time.
    pub filter: TemporalFilter,
    /// Result window.
    pub page: PageRequest,
}

/// Use-case port for reading bookings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingQuery: Send + Sync {
    /// Fetch one booking, visible only to its booker or the item owner.
    async fn get_booking(&self, request: GetBookingRequest) -> Result<BookingPayload, Error>;

    /// Bookings made by the user.
    async fn list_for_booker(
        &self,
        request: ListBookingsRequest,
    ) -> Result<Vec<BookingPayload>, Error>;

    /// Bookings of items the user owns.
    async fn list_for_owner(
        &self,
        request: ListBookingsRequest,
    ) -> Result<Vec<BookingPayload>, Error>;
}
