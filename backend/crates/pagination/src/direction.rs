//! Sort direction and boundary inclusivity.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Sort direction requested by a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Smallest keys first.
    #[default]
    Ascending,
    /// Largest keys first.
    Descending,
}

/// Whether a `since` boundary value belongs to the page it delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// Items equal to the boundary are returned.
    Inclusive,
    /// Items equal to the boundary are skipped.
    Exclusive,
}

impl Direction {
    /// Map the `desc` query flag onto a direction.
    #[must_use]
    pub const fn from_desc(desc: bool) -> Self {
        if desc {
            Self::Descending
        } else {
            Self::Ascending
        }
    }

    /// True when the listing runs from largest to smallest key.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::Descending)
    }

    /// Orient an ascending comparison so `Less` always means "earlier in the
    /// page".
    #[must_use]
    pub const fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Decide whether an item lies past the boundary.
    ///
    /// `ordering` is the ascending comparison of the item against the
    /// boundary value, i.e. `item.cmp(&since)`.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Bound, Direction};
    /// use std::cmp::Ordering;
    ///
    /// assert!(Direction::Ascending.admits(Ordering::Greater, Bound::Exclusive));
    /// assert!(Direction::Descending.admits(Ordering::Less, Bound::Exclusive));
    /// assert!(!Direction::Descending.admits(Ordering::Equal, Bound::Exclusive));
    /// assert!(Direction::Descending.admits(Ordering::Equal, Bound::Inclusive));
    /// ```
    #[must_use]
    pub const fn admits(self, ordering: Ordering, bound: Bound) -> bool {
        match self.orient(ordering) {
            Ordering::Greater => true,
            Ordering::Equal => matches!(bound, Bound::Inclusive),
            Ordering::Less => false,
        }
    }

    /// SQL `ORDER BY` keyword for this direction.
    #[must_use]
    pub const fn sql_keyword(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }

    /// SQL comparison operator selecting rows past a boundary.
    #[must_use]
    pub const fn sql_operator(self, bound: Bound) -> &'static str {
        match (self, bound) {
            (Self::Ascending, Bound::Exclusive) => ">",
            (Self::Ascending, Bound::Inclusive) => ">=",
            (Self::Descending, Bound::Exclusive) => "<",
            (Self::Descending, Bound::Inclusive) => "<=",
        }
    }
}
