//! In-memory persistence adapters implementing the domain's driven ports.

mod memory;
mod memory_booking_repository;
mod memory_comment_repository;
mod memory_item_repository;
mod memory_item_request_repository;
mod memory_user_repository;

pub use memory::MemoryStore;
pub use memory_booking_repository::MemoryBookingRepository;
pub use memory_comment_repository::MemoryCommentRepository;
pub use memory_item_repository::MemoryItemRepository;
pub use memory_item_request_repository::MemoryItemRequestRepository;
pub use memory_user_repository::MemoryUserRepository;
