//! Process-local post id allocation.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::PostId;
use crate::domain::ports::{PostIdSequence, StoreError};

const FIRST_ID: i64 = 1;

/// Monotonic post id counter starting at `1`.
#[derive(Debug)]
pub struct MemoryPostIdSequence {
    next: AtomicI64,
}

impl MemoryPostIdSequence {
    /// Create a counter positioned at the first id.
    pub const fn new() -> Self {
        Self {
            next: AtomicI64::new(FIRST_ID),
        }
    }
}

impl Default for MemoryPostIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostIdSequence for MemoryPostIdSequence {
    async fn next_ids(&self, count: usize) -> Result<Vec<PostId>, StoreError> {
        let width = i64::try_from(count)
            .map_err(|_| StoreError::query(format!("cannot allocate {count} post ids")))?;
        let start = self.next.fetch_add(width, Ordering::SeqCst);
        Ok((start..start + width).map(PostId::new).collect())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        self.next.store(FIRST_ID, Ordering::SeqCst);
        Ok(())
    }
}
