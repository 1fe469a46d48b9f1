//! Offset/limit pagination primitives.
//!
//! Endpoints accept `from`/`size` query parameters; this crate turns them into
//! a validated [`PageRequest`] and applies it to an already sorted result set.
//! An offset beyond the end of the data is an empty slice, never an error, so
//! clients can walk pages without tracking the total count. Callers must hand
//! in a totally ordered sequence, otherwise sequential pages may skip or
//! repeat rows.

use thiserror::Error;

/// Validation errors returned by [`PageRequest::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The page limit was zero; at least one row must be requested.
    #[error("page limit must be positive")]
    ZeroLimit,
}

/// A bounded window over a sorted result set.
///
/// # Examples
/// ```
/// use pagination::PageRequest;
///
/// let page = PageRequest::try_new(2, 2).expect("valid page");
/// assert_eq!(page.apply(vec![1, 2, 3, 4, 5]), vec![3, 4]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    offset: usize,
    limit: usize,
}

impl PageRequest {
    /// Construct a page request, rejecting a zero limit.
    pub const fn try_new(offset: usize, limit: usize) -> Result<Self, PageRequestError> {
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self { offset, limit })
    }

    /// Number of leading rows to skip.
    pub const fn offset(self) -> usize {
        self.offset
    }

    /// Maximum number of rows in the slice.
    pub const fn limit(self) -> usize {
        self.limit
    }

    /// Take this page's slice out of a sorted sequence.
    ///
    /// Offsets past the end of the sequence yield an empty vector.
    pub fn apply<T>(self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        rows.into_iter().skip(self.offset).take(self.limit).collect()
    }
}
