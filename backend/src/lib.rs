//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod test_support;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
