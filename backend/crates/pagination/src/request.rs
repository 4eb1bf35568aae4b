//! Listing request envelope.

use crate::{Direction, Limit};

/// Boundary, size, and direction of a single listing call.
///
/// `C` is the boundary type: a timestamp, a nickname, or a post cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest<C> {
    since: Option<C>,
    limit: Option<Limit>,
    direction: Direction,
}

impl<C> Default for PageRequest<C> {
    fn default() -> Self {
        Self::new(Direction::Ascending)
    }
}

impl<C> PageRequest<C> {
    /// Unbounded request in the given direction.
    #[must_use]
    pub const fn new(direction: Direction) -> Self {
        Self {
            since: None,
            limit: None,
            direction,
        }
    }

    /// Set the `since` boundary.
    #[must_use]
    pub fn with_since(mut self, since: C) -> Self {
        self.since = Some(since);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Boundary value, when present.
    #[must_use]
    pub const fn since(&self) -> Option<&C> {
        self.since.as_ref()
    }

    /// Page size, when present.
    #[must_use]
    pub const fn limit(&self) -> Option<Limit> {
        self.limit
    }

    /// Requested direction.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Convert the boundary while keeping size and direction.
    #[must_use]
    pub fn map_since<D>(self, convert: impl FnOnce(C) -> D) -> PageRequest<D> {
        PageRequest {
            since: self.since.map(convert),
            limit: self.limit,
            direction: self.direction,
        }
    }

    /// Truncate an already ordered and filtered sequence to the page size.
    #[must_use]
    pub fn take<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        match self.limit {
            Some(limit) => items.into_iter().take(limit.as_usize()).collect(),
            None => items.into_iter().collect(),
        }
    }
}
