//! Whole-store counters.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Number of stored entities of each kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Status {
    /// Registered users.
    pub user: i64,
    /// Forums.
    pub forum: i64,
    /// Threads.
    pub thread: i64,
    /// Posts.
    pub post: i64,
}
