//! Driving port for forum lookups and forum-scoped listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::PageRequest;

use crate::domain::{Error, Forum, Thread, User};

/// Read-only forum operations.
#[async_trait]
pub trait ForumQuery: Send + Sync {
    /// Fetch a forum by case-insensitive slug.
    async fn get_forum(&self, slug: &str) -> Result<Forum, Error>;

    /// List the forum's threads by creation time.
    async fn list_threads(
        &self,
        slug: &str,
        page: PageRequest<DateTime<Utc>>,
    ) -> Result<Vec<Thread>, Error>;

    /// List the forum's participants by nickname.
    async fn list_users(&self, slug: &str, page: PageRequest<String>) -> Result<Vec<User>, Error>;
}
