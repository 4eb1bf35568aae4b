//! Pagination primitives shared by forum listing endpoints.
//!
//! Every listing endpoint in the forum backend accepts the same trio of
//! query parameters: a `since` boundary, an optional `limit`, and a `desc`
//! flag. This crate models those parameters once so the domain and the
//! storage adapters agree on boundary semantics:
//!
//! - [`Direction`] orients comparisons and renders SQL keywords.
//! - [`Bound`] records whether the boundary itself is part of the page.
//! - [`Limit`] is a validated, strictly positive page size.
//! - [`PageRequest`] bundles the three for a given boundary type.
//!
//! # Examples
//! ```
//! use pagination::{Bound, Direction, Limit, PageRequest};
//! use std::cmp::Ordering;
//!
//! let request = PageRequest::new(Direction::Descending)
//!     .with_since(10_i64)
//!     .with_limit(Limit::new(2).expect("positive limit"));
//!
//! let since = *request.since().expect("boundary set");
//! let page = request.take(
//!     [12_i64, 10, 9, 7, 3]
//!         .into_iter()
//!         .filter(|id| request.direction().admits(id.cmp(&since), Bound::Exclusive)),
//! );
//! assert_eq!(page, vec![9, 7]);
//! assert_eq!(Direction::Ascending.orient(Ordering::Less), Ordering::Less);
//! ```

mod direction;
mod limit;
mod request;

pub use direction::{Bound, Direction};
pub use limit::{Limit, LimitError};
pub use request::PageRequest;
