//! User identity record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable user identifier assigned by the store.
///
/// Zero means "not yet persisted"; repositories assign a positive id on the
/// first save.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Underlying numeric value.
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Whether the store has assigned this id yet.
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered user. Identity is trusted as supplied by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, unique across users.
    pub email: String,
}

impl User {
    /// Build an unpersisted user; the repository assigns the id on save.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::default(),
            name: name.into(),
            email: email.into(),
        }
    }
}
