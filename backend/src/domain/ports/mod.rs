//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to persistence
//! adapters; driving ports are the use-case traits the transport layer
//! consumes. Each driven port exposes a strongly typed error enum so
//! adapters map their failures into predictable variants.

mod booking_command;
mod booking_payload;
mod booking_query;
mod booking_repository;
mod comment_repository;
mod item_repository;
mod item_request_repository;
mod item_request_use_cases;
mod item_use_cases;
mod user_repository;
mod user_use_cases;

#[cfg(test)]
pub use booking_command::MockBookingCommand;
pub use booking_command::{BookingCommand, CreateBookingRequest, DecideBookingRequest};
pub use booking_payload::{BookingPayload, ItemSnapshot, UserSnapshot};
#[cfg(test)]
pub use booking_query::MockBookingQuery;
pub use booking_query::{BookingQuery, GetBookingRequest, ListBookingsRequest};
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
pub use booking_repository::{BookingRepository, BookingRepositoryError};
#[cfg(test)]
pub use comment_repository::MockCommentRepository;
pub use comment_repository::{CommentRepository, CommentRepositoryError};
#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemRepository, ItemRepositoryError};
#[cfg(test)]
pub use item_request_repository::MockItemRequestRepository;
pub use item_request_repository::{ItemRequestRepository, ItemRequestRepositoryError};
#[cfg(test)]
pub use item_request_use_cases::MockItemRequestUseCases;
pub use item_request_use_cases::{ItemRequestPayload, ItemRequestUseCases, NewItemRequest};
#[cfg(test)]
pub use item_use_cases::MockItemUseCases;
pub use item_use_cases::{
    AddCommentRequest, BookingBrief, CommentPayload, CreateItemRequest, ItemDetailsPayload,
    ItemPayload, ItemUseCases, SearchItemsRequest, UpdateItemRequest,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use user_use_cases::MockUserUseCases;
pub use user_use_cases::{CreateUserRequest, UpdateUserRequest, UserPayload, UserUseCases};
