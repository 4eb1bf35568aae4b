//! `StatusRepository` over the in-process state.

use async_trait::async_trait;
use tracing::info;

use crate::domain::Status;
use crate::domain::ports::{StatusRepository, StoreError};

use super::{MemoryStore, State};

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

#[async_trait]
impl StatusRepository for MemoryStore {
    async fn counts(&self) -> Result<Status, StoreError> {
        let state = self.lock()?;
        Ok(Status {
            user: count(state.users.len()),
            forum: count(state.forums.len()),
            thread: count(state.threads.len()),
            post: count(state.posts.len()),
        })
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        *state = State::default();
        info!("memory store cleared");
        Ok(())
    }
}
