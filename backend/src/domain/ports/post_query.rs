//! Driving port for post detail lookups.

use async_trait::async_trait;

use crate::domain::{Error, PostDetails, PostId, Related};

/// Read-only post operations.
#[async_trait]
pub trait PostQuery: Send + Sync {
    /// Fetch a post and the requested related entities.
    async fn post_details(&self, id: PostId, related: Related) -> Result<PostDetails, Error>;
}
