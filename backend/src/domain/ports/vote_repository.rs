//! Port abstraction for thread votes.

use async_trait::async_trait;

use crate::domain::{ThreadId, Voice};

use super::StoreError;

/// Storage of per-user thread votes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Record or replace `nickname`'s vote and return the new thread total.
    ///
    /// The upsert and the total refresh form one atomic step serialized per
    /// thread, so concurrent votes never lose an update. Returns `None` when
    /// the thread does not exist.
    async fn cast(
        &self,
        thread: ThreadId,
        nickname: &str,
        voice: Voice,
    ) -> Result<Option<i32>, StoreError>;
}
