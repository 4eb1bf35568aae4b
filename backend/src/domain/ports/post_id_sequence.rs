//! Port abstraction for post id allocation.

use async_trait::async_trait;

use crate::domain::PostId;

use super::StoreError;

/// Source of unique, increasing post ids.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostIdSequence: Send + Sync {
    /// Reserve `count` ids in ascending order.
    async fn next_ids(&self, count: usize) -> Result<Vec<PostId>, StoreError>;

    /// Restart allocation from `1`.
    async fn reset(&self) -> Result<(), StoreError>;
}
