//! Port abstraction for forum persistence and forum-scoped listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Forum, Thread, User};

use super::StoreError;

/// Storage of forums and their listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Store a new forum.
    ///
    /// Fails with [`StoreError::Duplicate`] when the slug is taken.
    async fn insert(&self, forum: &Forum) -> Result<(), StoreError>;

    /// Fetch a forum by case-insensitive slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, StoreError>;

    /// Threads of the forum with canonical slug `forum`, ordered by
    /// `(created, id)`. The `since` timestamp is inclusive.
    async fn list_threads(
        &self,
        forum: &str,
        page: &PageRequest<DateTime<Utc>>,
    ) -> Result<Vec<Thread>, StoreError>;

    /// Users who authored a thread or post in the forum, ordered by
    /// case-folded nickname. The `since` nickname is exclusive.
    async fn list_users(
        &self,
        forum: &str,
        page: &PageRequest<String>,
    ) -> Result<Vec<User>, StoreError>;
}
