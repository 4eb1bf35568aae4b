//! `ForumRepository` over the in-process state.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Bound, PageRequest};

use crate::domain::ports::{ForumRepository, StoreError};
use crate::domain::{Forum, Thread, User, fold_case};

use super::MemoryStore;

#[async_trait]
impl ForumRepository for MemoryStore {
    async fn insert(&self, forum: &Forum) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let slug = fold_case(&forum.slug);
        if state
            .forums
            .iter()
            .any(|existing| fold_case(&existing.slug) == slug)
        {
            return Err(StoreError::duplicate(format!(
                "forum {} already exists",
                forum.slug
            )));
        }
        state.forums.push(forum.clone());
        Ok(())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, StoreError> {
        let state = self.lock()?;
        let slug = fold_case(slug);
        Ok(state
            .forums
            .iter()
            .find(|forum| fold_case(&forum.slug) == slug)
            .cloned())
    }

    async fn list_threads(
        &self,
        forum: &str,
        page: &PageRequest<DateTime<Utc>>,
    ) -> Result<Vec<Thread>, StoreError> {
        let state = self.lock()?;
        let direction = page.direction();
        let mut threads: Vec<Thread> = state
            .threads
            .iter()
            .filter(|thread| thread.forum == forum)
            .filter(|thread| {
                page.since().is_none_or(|since| {
                    direction.admits(thread.created.cmp(since), Bound::Inclusive)
                })
            })
            .cloned()
            .collect();
        threads.sort_by(|left, right| {
            direction.orient((left.created, left.id).cmp(&(right.created, right.id)))
        });
        Ok(page.take(threads))
    }

    async fn list_users(
        &self,
        forum: &str,
        page: &PageRequest<String>,
    ) -> Result<Vec<User>, StoreError> {
        let state = self.lock()?;
        let direction = page.direction();
        let since = page.since().map(|since| fold_case(since));
        let mut members: Vec<(String, User)> = state
            .participants
            .iter()
            .filter(|(slug, _)| slug == forum)
            .filter(|(_, nickname)| {
                since
                    .as_ref()
                    .is_none_or(|since| direction.admits(nickname.cmp(since), Bound::Exclusive))
            })
            .filter_map(|(_, nickname)| {
                state
                    .user(nickname)
                    .map(|user| (nickname.clone(), user.clone()))
            })
            .collect();
        members.sort_by(|left, right| direction.orient(left.0.cmp(&right.0)));
        Ok(page.take(members.into_iter().map(|(_, user)| user)))
    }
}
