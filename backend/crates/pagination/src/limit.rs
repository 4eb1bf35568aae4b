//! Validated page size.

use std::num::NonZeroU32;

use thiserror::Error;

/// Errors raised when a raw page size cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LimitError {
    /// Zero or negative sizes are rejected.
    #[error("limit must be positive, got {value}")]
    NotPositive {
        /// The rejected value.
        value: i64,
    },
    /// Values beyond `u32::MAX` are rejected.
    #[error("limit {value} exceeds the maximum page size")]
    TooLarge {
        /// The rejected value.
        value: i64,
    },
}

/// Strictly positive maximum number of items in a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Limit(NonZeroU32);

impl Limit {
    /// Validate a raw page size.
    ///
    /// # Errors
    /// Returns [`LimitError`] when `value` is not positive or does not fit a
    /// `u32`.
    pub fn new(value: i64) -> Result<Self, LimitError> {
        if value <= 0 {
            return Err(LimitError::NotPositive { value });
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(LimitError::TooLarge { value })
    }

    /// Page size as a `u32`.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Page size as a collection length.
    #[must_use]
    pub fn as_usize(self) -> usize {
        usize::try_from(self.0.get()).unwrap_or(usize::MAX)
    }

    /// Page size as a SQL `BIGINT`.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        i64::from(self.0.get())
    }
}

impl TryFrom<i64> for Limit {
    type Error = LimitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
