//! Driving port for thread lookups and post listings.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostListing, Thread, ThreadLocator};

/// Read-only thread operations.
#[async_trait]
pub trait ThreadQuery: Send + Sync {
    /// Fetch a thread by id or slug.
    async fn get_thread(&self, locator: &ThreadLocator) -> Result<Thread, Error>;

    /// List the thread's posts in the requested order.
    async fn list_posts(
        &self,
        locator: &ThreadLocator,
        listing: PostListing,
    ) -> Result<Vec<Post>, Error>;
}
