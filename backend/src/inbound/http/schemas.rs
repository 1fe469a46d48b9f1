//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A booking window's end does not lie strictly after its start.
    #[schema(rename = "invalid_interval")]
    InvalidInterval,
    /// The item cannot be booked right now.
    #[schema(rename = "not_available")]
    NotAvailable,
    /// A booking transition was attempted from a terminal status.
    #[schema(rename = "invalid_state")]
    InvalidState,
    /// An unrecognised temporal filter token.
    #[schema(rename = "invalid_filter")]
    InvalidFilter,
    /// The requested resource does not exist, or the caller may not see it.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_available")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "item with id=3 not available")]
    message: String,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}
