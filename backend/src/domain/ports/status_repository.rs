//! Port abstraction for whole-store maintenance.

use async_trait::async_trait;

use crate::domain::Status;

use super::StoreError;

/// Store-wide counting and reset.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatusRepository: Send + Sync {
    /// Count users, forums, threads, and posts.
    async fn counts(&self) -> Result<Status, StoreError>;

    /// Delete every stored entity and restart thread id assignment.
    async fn clear(&self) -> Result<(), StoreError>;
}
