//! Boundary validation: caller identity and pagination parameters.
//!
//! Raw header and query strings stop here; handlers pass typed values into
//! the domain.

use actix_web::HttpRequest;
use pagination::PageRequest;
use serde::Deserialize;

use crate::domain::{Error, UserId};

/// Header naming the acting user. The value is trusted as supplied.
pub const SHARER_USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extract and parse the acting user's id from the identity header.
pub fn require_user_id(request: &HttpRequest) -> Result<UserId, Error> {
    let raw = request
        .headers()
        .get(SHARER_USER_ID_HEADER)
        .ok_or_else(|| {
            Error::invalid_request(format!("missing {SHARER_USER_ID_HEADER} header"))
        })?;
    let value = raw
        .to_str()
        .ok()
        .and_then(|text| text.trim().parse::<i64>().ok())
        .ok_or_else(|| {
            Error::invalid_request(format!("{SHARER_USER_ID_HEADER} header must be numeric"))
        })?;
    Ok(UserId::new(value))
}

/// `from`/`size` query parameters shared by every paged endpoint.
#[derive(Debug, Clone, Copy, Deserialize, utoipa::IntoParams)]
#[serde(default)]
pub struct PageParams {
    /// Leading rows to skip.
    pub from: usize,
    /// Maximum rows to return; must be positive.
    pub size: usize,
}

impl Default for PageParams {
    fn default() -> Self {
        Self { from: 0, size: 10 }
    }
}

impl TryFrom<PageParams> for PageRequest {
    type Error = Error;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        Self::try_new(params.from, params.size)
            .map_err(|err| Error::invalid_request(err.to_string()))
    }
}
