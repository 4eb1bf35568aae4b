//! Driving port for post creation and edits.

use async_trait::async_trait;

use crate::domain::{Error, Post, PostDraft, PostId, PostPatch, ThreadLocator};

/// Mutating post operations.
#[async_trait]
pub trait PostCommand: Send + Sync {
    /// Append a batch of posts to a thread, all or nothing.
    async fn create_posts(
        &self,
        locator: &ThreadLocator,
        drafts: Vec<PostDraft>,
    ) -> Result<Vec<Post>, Error>;

    /// Edit a post's message.
    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post, Error>;
}
