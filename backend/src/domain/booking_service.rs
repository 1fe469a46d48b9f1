//! Booking engine: conflict checks, the approval state machine, and
//! role-scoped, time-windowed listings.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use mockable::Clock;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::ports::{
    BookingCommand, BookingPayload, BookingQuery, BookingRepository, CreateBookingRequest,
    DecideBookingRequest, GetBookingRequest, ItemRepository, ListBookingsRequest, UserRepository,
};
use crate::domain::{Booking, BookingWindow, Error, Item, ItemId, User, UserId};

/// The booking engine.
///
/// Implements [`BookingCommand`] and [`BookingQuery`] over the booking,
/// item and user repositories. "Now" always comes from the injected clock so
/// temporal filters are deterministic under test.
pub struct BookingService<B, I, U> {
    bookings: Arc<B>,
    items: Arc<I>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
    // One async mutex per item serialises the overlap check with the insert;
    // without it two concurrent creations could both pass the check.
    item_locks: DashMap<ItemId, Arc<Mutex<()>>>,
}

impl<B, I, U> BookingService<B, I, U> {
    /// Create the engine over its repositories and clock.
    pub fn new(bookings: Arc<B>, items: Arc<I>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            bookings,
            items,
            users,
            clock,
            item_locks: DashMap::new(),
        }
    }

    fn item_lock(&self, item_id: ItemId) -> Arc<Mutex<()>> {
        Arc::clone(&self.item_locks.entry(item_id).or_default())
    }
}

impl<B, I, U> BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    async fn require_user(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| Error::not_found(format!("user with id={user_id} not found")))
    }

    /// Load the item a persisted booking references. Absence here means the
    /// store lost referential integrity, not a client mistake.
    async fn referenced_item(&self, booking: &Booking) -> Result<Item, Error> {
        self.items
            .find_by_id(booking.item_id())
            .await?
            .ok_or_else(|| {
                Error::internal(format!(
                    "booking with id={} references missing item with id={}",
                    booking.id(),
                    booking.item_id()
                ))
            })
    }

    async fn referenced_booker(&self, booking: &Booking) -> Result<User, Error> {
        self.users
            .find_by_id(booking.booker_id())
            .await?
            .ok_or_else(|| {
                Error::internal(format!(
                    "booking with id={} references missing user with id={}",
                    booking.id(),
                    booking.booker_id()
                ))
            })
    }

    async fn project(&self, booking: &Booking) -> Result<BookingPayload, Error> {
        let item = self.referenced_item(booking).await?;
        let booker = self.referenced_booker(booking).await?;
        Ok(BookingPayload::project(booking, &item, &booker))
    }

    async fn project_all(&self, bookings: Vec<Booking>) -> Result<Vec<BookingPayload>, Error> {
        let mut payloads = Vec::with_capacity(bookings.len());
        for booking in &bookings {
            payloads.push(self.project(booking).await?);
        }
        Ok(payloads)
    }
}

#[async_trait]
impl<B, I, U> BookingCommand for BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    async fn create_booking(
        &self,
        request: CreateBookingRequest,
    ) -> Result<BookingPayload, Error> {
        let window = BookingWindow::try_new(request.start, request.end)
            .map_err(|err| Error::invalid_interval(err.to_string()))?;

        // Hold the item's lock from the first read to the insert so the
        // overlap check cannot go stale under concurrent creations.
        let lock = self.item_lock(request.item_id);
        let _guard = lock.lock().await;

        let item = self
            .items
            .find_by_id(request.item_id)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!("item with id={} not found", request.item_id))
            })?;

        // Administrative unavailability and a temporal conflict surface the
        // same way on purpose: callers only learn "cannot book now".
        if !item.available {
            warn!(item_id = %item.id, "booking refused: item not available");
            return Err(Error::not_available(format!(
                "item with id={} not available",
                item.id
            )));
        }
        let conflict = self
            .bookings
            .find_approved_overlap(item.id, window)
            .await?;
        if conflict.is_some() {
            warn!(item_id = %item.id, "booking refused: window conflicts with an approved booking");
            return Err(Error::not_available(format!(
                "item with id={} not available",
                item.id
            )));
        }

        // Owners cannot book their own items; reported as not-found so the
        // response does not leak ownership.
        if item.owner_id == request.booker_id {
            warn!(item_id = %item.id, booker_id = %request.booker_id, "booking refused: booker owns the item");
            return Err(Error::not_found(format!(
                "bookerId={} equals ownerId of item with id={}",
                request.booker_id, item.id
            )));
        }

        let booker = self.require_user(request.booker_id).await?;

        let saved = self
            .bookings
            .save(&Booking::new(window, item.id, request.booker_id))
            .await?;
        info!(booking_id = %saved.id(), item_id = %item.id, booker_id = %booker.id, "booking created");

        Ok(BookingPayload::project(&saved, &item, &booker))
    }

    async fn decide_booking(
        &self,
        request: DecideBookingRequest,
    ) -> Result<BookingPayload, Error> {
        self.require_user(request.acting_owner_id).await?;

        let mut booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "booking with id={} not found",
                    request.booking_id
                ))
            })?;

        let item = self.referenced_item(&booking).await?;
        if item.owner_id != request.acting_owner_id {
            // Ownership mismatch reads exactly like a missing booking.
            warn!(booking_id = %booking.id(), acting_user = %request.acting_owner_id, "decision refused: not the item owner");
            return Err(Error::not_found(format!(
                "booking with id={} not found",
                request.booking_id
            )));
        }

        // No overlap re-check here: conflicts are enforced only at creation
        // time against already-approved bookings. Approving the second of
        // two overlapping waiting bookings is mechanically permitted.
        booking
            .decide(request.approve)
            .map_err(|err| Error::invalid_state(err.to_string()))?;

        let saved = self
            .bookings
            .save(&booking)
            .await?;
        info!(booking_id = %saved.id(), status = %saved.status(), "booking decided");

        let booker = self.referenced_booker(&saved).await?;
        Ok(BookingPayload::project(&saved, &item, &booker))
    }
}

#[async_trait]
impl<B, I, U> BookingQuery for BookingService<B, I, U>
where
    B: BookingRepository,
    I: ItemRepository,
    U: UserRepository,
{
    async fn get_booking(&self, request: GetBookingRequest) -> Result<BookingPayload, Error> {
        self.require_user(request.user_id).await?;

        let booking = self
            .bookings
            .find_by_id(request.booking_id)
            .await?
            .ok_or_else(|| {
                Error::not_found(format!(
                    "booking with id={} not found",
                    request.booking_id
                ))
            })?;

        let item = self.referenced_item(&booking).await?;
        if booking.booker_id() != request.user_id && item.owner_id != request.user_id {
            // Visibility is existence-hiding: strangers get the same answer
            // as for an unknown booking.
            return Err(Error::not_found(format!(
                "booking with id={} with (bookerId or ownerId)={} not found",
                request.booking_id, request.user_id
            )));
        }

        let booker = self.referenced_booker(&booking).await?;
        Ok(BookingPayload::project(&booking, &item, &booker))
    }

    async fn list_for_booker(
        &self,
        request: ListBookingsRequest,
    ) -> Result<Vec<BookingPayload>, Error> {
        self.require_user(request.user_id).await?;
        let now = self.clock.utc();
        let rows = self
            .bookings
            .find_by_booker(request.user_id, request.filter, now, request.page)
            .await?;
        self.project_all(rows).await
    }

    async fn list_for_owner(
        &self,
        request: ListBookingsRequest,
    ) -> Result<Vec<BookingPayload>, Error> {
        self.require_user(request.user_id).await?;
        let now = self.clock.utc();
        let rows = self
            .bookings
            .find_by_item_owner(request.user_id, request.filter, now, request.page)
            .await?;
        self.project_all(rows).await
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
