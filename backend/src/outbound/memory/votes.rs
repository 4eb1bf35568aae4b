//! `VoteRepository` over the in-process state.

use async_trait::async_trait;

use crate::domain::ports::{StoreError, VoteRepository};
use crate::domain::{ThreadId, Voice, fold_case};

use super::MemoryStore;

#[async_trait]
impl VoteRepository for MemoryStore {
    async fn cast(
        &self,
        thread: ThreadId,
        nickname: &str,
        voice: Voice,
    ) -> Result<Option<i32>, StoreError> {
        let mut state = self.lock()?;
        if state.thread_mut(thread).is_none() {
            return Ok(None);
        }
        state.votes.insert((thread, fold_case(nickname)), voice);
        let total: i32 = state
            .votes
            .iter()
            .filter(|((voted, _), _)| *voted == thread)
            .map(|(_, voice)| voice.value())
            .sum();
        if let Some(stored) = state.thread_mut(thread) {
            stored.votes = total;
        }
        Ok(Some(total))
    }
}
