//! Port abstraction for post persistence and thread post listings.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{Post, PostId, PostSort, ThreadId};

use super::StoreError;

/// Storage of posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Fetch a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Store a fully assembled batch.
    ///
    /// Either every post is stored, the forum post counter grows by the batch
    /// size, and every author is recorded as a forum participant, or nothing
    /// changes.
    async fn insert_batch(&self, posts: &[Post]) -> Result<(), StoreError>;

    /// Posts of a thread in the requested order.
    ///
    /// The page boundary is the already resolved `since` post.
    async fn list(
        &self,
        thread: ThreadId,
        sort: PostSort,
        page: &PageRequest<Post>,
    ) -> Result<Vec<Post>, StoreError>;

    /// Replace a post's message and mark it edited.
    async fn update_message(&self, id: PostId, message: &str)
    -> Result<Option<Post>, StoreError>;
}
