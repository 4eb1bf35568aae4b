//! Port abstraction for thread persistence.

use async_trait::async_trait;

use crate::domain::{NewThread, Thread, ThreadLocator};

use super::StoreError;

/// Storage of threads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Store a new thread, assigning its id.
    ///
    /// In the same atomic step the forum's thread counter is incremented and
    /// the author is recorded as a forum participant. Fails with
    /// [`StoreError::Duplicate`] when the slug is taken.
    async fn insert(&self, thread: &NewThread) -> Result<Thread, StoreError>;

    /// Fetch a thread by id or case-insensitive slug.
    async fn find(&self, locator: &ThreadLocator) -> Result<Option<Thread>, StoreError>;

    /// Overwrite the title and message of the thread with `thread.id`.
    async fn update(&self, thread: &Thread) -> Result<Option<Thread>, StoreError>;
}
