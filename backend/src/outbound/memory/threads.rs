//! `ThreadRepository` over the in-process state.

use async_trait::async_trait;

use crate::domain::ports::{StoreError, ThreadRepository};
use crate::domain::{NewThread, Thread, ThreadId, ThreadLocator, fold_case};

use super::MemoryStore;

#[async_trait]
impl ThreadRepository for MemoryStore {
    async fn insert(&self, thread: &NewThread) -> Result<Thread, StoreError> {
        let mut state = self.lock()?;
        if let Some(slug) = thread.slug.as_deref() {
            let folded = fold_case(slug);
            let taken = state.threads.iter().any(|existing| {
                existing
                    .slug
                    .as_deref()
                    .is_some_and(|other| fold_case(other) == folded)
            });
            if taken {
                return Err(StoreError::duplicate(format!("thread {slug} already exists")));
            }
        }

        state.forum_mut(&thread.forum)?.threads += 1;
        state.last_thread_id += 1;
        let stored = Thread {
            id: ThreadId::new(state.last_thread_id),
            title: thread.title.clone(),
            author: thread.author.clone(),
            forum: thread.forum.clone(),
            message: thread.message.clone(),
            votes: 0,
            slug: thread.slug.clone(),
            created: thread.created,
        };
        state.threads.push(stored.clone());
        state.join(&thread.forum, &thread.author);
        Ok(stored)
    }

    async fn find(&self, locator: &ThreadLocator) -> Result<Option<Thread>, StoreError> {
        let state = self.lock()?;
        let found = match locator {
            ThreadLocator::Id(id) => state.threads.iter().find(|thread| thread.id == *id),
            ThreadLocator::Slug(slug) => {
                let folded = fold_case(slug);
                state.threads.iter().find(|thread| {
                    thread
                        .slug
                        .as_deref()
                        .is_some_and(|other| fold_case(other) == folded)
                })
            }
        };
        Ok(found.cloned())
    }

    async fn update(&self, thread: &Thread) -> Result<Option<Thread>, StoreError> {
        let mut state = self.lock()?;
        let Some(stored) = state.thread_mut(thread.id) else {
            return Ok(None);
        };
        stored.title.clone_from(&thread.title);
        stored.message.clone_from(&thread.message);
        Ok(Some(stored.clone()))
    }
}
