//! Domain layer: entities, the booking engine, and the ports it is wired
//! through.
//!
//! Everything here is transport and storage agnostic. Inbound adapters drive
//! the use-case traits in [`ports`]; outbound adapters implement the
//! repository traits. "Now" is always an explicit parameter or an injected
//! clock, never a hidden system call.

mod booking;
mod booking_service;
mod comment;
mod error;
mod item;
mod item_request;
mod item_request_service;
mod item_service;
pub mod ports;
mod user;
mod user_service;

pub use booking::{
    Booking, BookingId, BookingStateError, BookingStatus, BookingWindow, BookingWindowError,
    TemporalFilter, TemporalFilterParseError,
};
pub use booking_service::BookingService;
pub use comment::{Comment, CommentId};
pub use error::{Error, ErrorCode};
pub use item::{Item, ItemId};
pub use item_request::{ItemRequest, RequestId};
pub use item_request_service::ItemRequestService;
pub use item_service::ItemCatalogService;
pub use user::{User, UserId};
pub use user_service::UserAccountService;
