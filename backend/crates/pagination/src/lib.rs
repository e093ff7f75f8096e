//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] is the bounded skip/limit window a list query may
//! request. Clients cannot ask for unbounded result sets: the limit defaults
//! to [`DEFAULT_LIMIT`] and is clamped to [`MAX_LIMIT`].
//!
//! # Examples
//!
//! ```
//! use pagination::{PageRequest, SortDirection};
//!
//! let page = PageRequest::new(Some(1000), Some(20)).expect("valid window");
//! assert_eq!(page.limit(), 50);
//! assert_eq!(page.offset(), 20);
//! assert_eq!(SortDirection::from_order(Some("DESC")), SortDirection::Descending);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when the caller does not request one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest page size a caller may obtain.
pub const MAX_LIMIT: u32 = 50;

/// Errors raised when a requested window cannot be honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// The requested limit was below zero.
    #[error("limit must not be negative (got {0})")]
    NegativeLimit(i64),
    /// The requested offset was below zero.
    #[error("offset must not be negative (got {0})")]
    NegativeOffset(i64),
}

/// Validated skip/limit window.
///
/// ## Invariants
/// - `limit` is within `1..=MAX_LIMIT`.
/// - `offset` is non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    offset: u64,
    limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a window from optional caller-supplied values.
    ///
    /// A missing or zero limit falls back to [`DEFAULT_LIMIT`]; anything above
    /// [`MAX_LIMIT`] is clamped. A missing offset starts at the first match.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when either value is negative.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Result<Self, PageRequestError> {
        let limit = match limit {
            None | Some(0) => DEFAULT_LIMIT,
            Some(value) if value < 0 => return Err(PageRequestError::NegativeLimit(value)),
            Some(value) => u32::try_from(value)
                .map_or(MAX_LIMIT, |requested| requested.min(MAX_LIMIT)),
        };
        let offset = match offset {
            None => 0,
            Some(value) => {
                u64::try_from(value).map_err(|_| PageRequestError::NegativeOffset(value))?
            }
        };
        Ok(Self { offset, limit })
    }

    /// Number of matches to skip.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of records to return.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Apply the window to an already ordered iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagination::PageRequest;
    ///
    /// let page = PageRequest::new(Some(2), Some(1)).expect("valid window");
    /// let window: Vec<_> = page.apply(1..=5).collect();
    /// assert_eq!(window, vec![2, 3]);
    /// ```
    pub fn apply<I>(&self, items: I) -> impl Iterator<Item = I::Item>
    where
        I: IntoIterator,
    {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(take)
    }
}

/// Ordering applied to a named sort key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest values first.
    #[default]
    #[serde(rename = "ASC")]
    Ascending,
    /// Largest values first.
    #[serde(rename = "DESC")]
    Descending,
}

impl SortDirection {
    /// Interpret a client-supplied order string.
    ///
    /// Only the exact string `"DESC"` selects descending order; every other
    /// value, including lowercase `"desc"`, sorts ascending.
    #[must_use]
    pub fn from_order(order: Option<&str>) -> Self {
        match order {
            Some("DESC") => Self::Descending,
            _ => Self::Ascending,
        }
    }

    /// Whether this direction reverses the natural order.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }
}
