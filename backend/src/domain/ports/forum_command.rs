//! Driving port for forum and thread creation.

use async_trait::async_trait;

use crate::domain::{CreateOutcome, Error, Forum, ForumDraft, Thread, ThreadDraft};

/// Mutating forum operations.
#[async_trait]
pub trait ForumCommand: Send + Sync {
    /// Create a forum, or report the forum already holding the slug.
    async fn create_forum(&self, draft: ForumDraft) -> Result<CreateOutcome<Forum>, Error>;

    /// Open a thread in `forum`, or report the thread already holding the
    /// requested slug.
    async fn create_thread(
        &self,
        forum: &str,
        draft: ThreadDraft,
    ) -> Result<CreateOutcome<Thread>, Error>;
}
