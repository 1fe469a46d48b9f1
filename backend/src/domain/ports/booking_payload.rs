//! Denormalized booking views returned by the engine.

use chrono::{DateTime, Utc};

use crate::domain::{Booking, BookingId, BookingStatus, Item, ItemId, User, UserId};

/// Item fields embedded in a booking view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    /// Item identifier.
    pub id: ItemId,
    /// Item display name at projection time.
    pub name: String,
    /// Availability toggle at projection time.
    pub available: bool,
}

impl From<&Item> for ItemSnapshot {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            available: item.available,
        }
    }
}

/// User fields embedded in a booking view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSnapshot {
    /// User identifier.
    pub id: UserId,
    /// Display name at projection time.
    pub name: String,
}

impl From<&User> for UserSnapshot {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
        }
    }
}

/// A booking joined with snapshots of its item and booker.
///
/// Built at response-construction time; the booking record itself only holds
/// foreign keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingPayload {
    /// Booking identifier.
    pub id: BookingId,
    /// Inclusive start of the booked window.
    pub start: DateTime<Utc>,
    /// Exclusive end of the booked window.
    pub end: DateTime<Utc>,
    /// Approval status.
    pub status: BookingStatus,
    /// Snapshot of the booked item.
    pub item: ItemSnapshot,
    /// Snapshot of the requesting user.
    pub booker: UserSnapshot,
}

impl BookingPayload {
    /// Join a booking with its item and booker.
    pub fn project(booking: &Booking, item: &Item, booker: &User) -> Self {
        Self {
            id: booking.id(),
            start: booking.window().start(),
            end: booking.window().end(),
            status: booking.status(),
            item: ItemSnapshot::from(item),
            booker: UserSnapshot::from(booker),
        }
    }
}
