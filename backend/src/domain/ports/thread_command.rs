//! Driving port for thread edits and votes.

use async_trait::async_trait;

use crate::domain::{Error, Thread, ThreadLocator, ThreadPatch, VoteDraft};

/// Mutating thread operations.
#[async_trait]
pub trait ThreadCommand: Send + Sync {
    /// Apply a partial thread update.
    async fn update_thread(
        &self,
        locator: &ThreadLocator,
        patch: ThreadPatch,
    ) -> Result<Thread, Error>;

    /// Record a vote and return the thread with its refreshed total.
    async fn vote(&self, locator: &ThreadLocator, vote: VoteDraft) -> Result<Thread, Error>;
}
