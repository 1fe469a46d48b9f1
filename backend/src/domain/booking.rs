//! Booking aggregate: time window, approval state machine, temporal filters.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::item::ItemId;
use super::user::UserId;

/// Stable booking identifier assigned by the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct BookingId(i64);

impl BookingId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Underlying numeric value.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation errors returned by [`BookingWindow::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingWindowError {
    /// The end instant does not lie strictly after the start instant.
    #[error("booking end must be strictly after its start")]
    EndNotAfterStart,
}

/// Half-open booking interval `[start, end)`.
///
/// Construction enforces `end > start`, so a window always covers at least
/// one instant and zero-length bookings cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl BookingWindow {
    /// Construct a window, rejecting `end <= start`.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::BookingWindow;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
    /// let end = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
    /// let window = BookingWindow::try_new(start, end).expect("valid window");
    /// assert!(window.overlaps(&window));
    /// ```
    pub fn try_new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, BookingWindowError> {
        if end <= start {
            return Err(BookingWindowError::EndNotAfterStart);
        }
        Ok(Self { start, end })
    }

    /// Inclusive start instant.
    pub const fn start(self) -> DateTime<Utc> {
        self.start
    }

    /// Exclusive end instant.
    pub const fn end(self) -> DateTime<Utc> {
        self.end
    }

    /// Whether two windows share at least one instant.
    pub fn overlaps(self, other: &Self) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Whether the window covers `at` (`start <= at < end`).
    pub fn contains(self, at: DateTime<Utc>) -> bool {
        self.start <= at && at < self.end
    }

    /// Whether the window ended before `at`.
    pub fn ended_before(self, at: DateTime<Utc>) -> bool {
        self.end < at
    }

    /// Whether the window starts after `at`.
    pub fn starts_after(self, at: DateTime<Utc>) -> bool {
        self.start > at
    }
}

/// Booking approval status. `Waiting` is initial; the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, not yet decided by the owner.
    Waiting,
    /// Approved by the item owner. Terminal.
    Approved,
    /// Rejected by the item owner. Terminal.
    Rejected,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::Waiting => "WAITING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(token)
    }
}

/// Errors raised by illegal status transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BookingStateError {
    /// The booking already left `Waiting`; no further transition is allowed.
    #[error("booking is already {status} and cannot be decided again")]
    AlreadyDecided {
        /// The terminal status the booking holds.
        status: BookingStatus,
    },
}

/// A time-bounded booking of an item.
///
/// Holds only foreign keys; item and booker snapshots are joined in at
/// response-construction time. Mutable exactly once, via [`Booking::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id: BookingId,
    window: BookingWindow,
    item_id: ItemId,
    booker_id: UserId,
    status: BookingStatus,
}

impl Booking {
    /// Build an unpersisted booking in `Waiting` status.
    pub fn new(window: BookingWindow, item_id: ItemId, booker_id: UserId) -> Self {
        Self {
            id: BookingId::default(),
            window,
            item_id,
            booker_id,
            status: BookingStatus::Waiting,
        }
    }

    /// Store-assigned identifier.
    pub const fn id(&self) -> BookingId {
        self.id
    }

    /// Booked time window.
    pub const fn window(&self) -> BookingWindow {
        self.window
    }

    /// Booked item.
    pub const fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Requesting user.
    pub const fn booker_id(&self) -> UserId {
        self.booker_id
    }

    /// Current approval status.
    pub const fn status(&self) -> BookingStatus {
        self.status
    }

    /// Attach a store-assigned id. Used by repositories on first insert.
    pub const fn with_id(mut self, id: BookingId) -> Self {
        self.id = id;
        self
    }

    /// Apply the owner's decision: `Waiting -> Approved | Rejected`.
    ///
    /// Fails without mutating once the booking left `Waiting`. The engine
    /// deliberately performs no overlap re-check here; conflicts are only
    /// enforced against already-approved bookings at creation time.
    pub fn decide(&mut self, approve: bool) -> Result<(), BookingStateError> {
        if self.status != BookingStatus::Waiting {
            return Err(BookingStateError::AlreadyDecided {
                status: self.status,
            });
        }
        self.status = if approve {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };
        Ok(())
    }
}

/// Errors returned when parsing a temporal filter token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemporalFilterParseError {
    /// The token names no known filter.
    #[error("Unknown state: {token}")]
    Unknown {
        /// The rejected input token.
        token: String,
    },
}

/// Named predicate narrowing a booking list relative to "now" or status.
///
/// Parsed once at the transport boundary; the engine only ever sees the
/// closed enum, never a raw string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalFilter {
    /// No temporal or status restriction.
    All,
    /// `end < now`.
    Past,
    /// `start > now`.
    Future,
    /// `start <= now < end`.
    Current,
    /// Status is `Waiting`.
    Waiting,
    /// Status is `Rejected`.
    Rejected,
}

impl TemporalFilter {
    /// Evaluate the predicate for one booking at the given instant.
    pub fn matches(self, booking: &Booking, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Past => booking.window().ended_before(now),
            Self::Future => booking.window().starts_after(now),
            Self::Current => booking.window().contains(now),
            Self::Waiting => booking.status() == BookingStatus::Waiting,
            Self::Rejected => booking.status() == BookingStatus::Rejected,
        }
    }
}

impl FromStr for TemporalFilter {
    type Err = TemporalFilterParseError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_uppercase().as_str() {
            "ALL" => Ok(Self::All),
            "PAST" => Ok(Self::Past),
            "FUTURE" => Ok(Self::Future),
            "CURRENT" => Ok(Self::Current),
            "WAITING" => Ok(Self::Waiting),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(TemporalFilterParseError::Unknown {
                token: token.to_owned(),
            }),
        }
    }
}
