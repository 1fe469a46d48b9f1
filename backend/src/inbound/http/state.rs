//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the driving ports and stay testable with mock use-cases.

use std::sync::Arc;

use crate::domain::ports::{
    BookingCommand, BookingQuery, ItemRequestUseCases, ItemUseCases, UserUseCases,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Booking mutations (create, decide).
    pub bookings: Arc<dyn BookingCommand>,
    /// Booking reads (get, role-scoped listings).
    pub bookings_query: Arc<dyn BookingQuery>,
    /// User account use-cases.
    pub users: Arc<dyn UserUseCases>,
    /// Item catalog use-cases.
    pub items: Arc<dyn ItemUseCases>,
    /// Item request use-cases.
    pub requests: Arc<dyn ItemRequestUseCases>,
}
