//! HTTP mapping for domain errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn domain failures into consistent JSON bodies and status codes.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest
        | ErrorCode::InvalidInterval
        | ErrorCode::NotAvailable
        | ErrorCode::InvalidState
        | ErrorCode::InvalidFilter => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Internal failures keep their detail in the logs, never in the response.
fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        error!(detail = %error.message(), "internal error returned to client");
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Error::invalid_request("bad header"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_interval("end before start"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_available("item busy"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_state("already approved"), StatusCode::BAD_REQUEST)]
    #[case(Error::invalid_filter("Unknown state: SOMEDAY"), StatusCode::BAD_REQUEST)]
    #[case(Error::not_found("no such booking"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("email taken"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("store down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn every_code_maps_to_its_status(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[rstest]
    fn internal_detail_is_redacted_from_the_body() {
        let body = redact_if_internal(&Error::internal("connection string leaked"));
        assert_eq!(body.message(), "Internal server error");
    }

    #[rstest]
    fn client_errors_keep_their_message() {
        let body = redact_if_internal(&Error::not_found("booking with id=7 not found"));
        assert_eq!(body.message(), "booking with id=7 not found");
    }
}
