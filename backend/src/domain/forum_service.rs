//! Forum domain service: forum registration, thread creation, and
//! forum-scoped listings.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use pagination::PageRequest;
use tracing::{info, warn};

use super::clock::{store_timestamp, to_store_precision};
use super::ports::{
    ForumCommand, ForumQuery, ForumRepository, StoreError, ThreadRepository, map_store_error,
};
use super::slug::validate_slug;
use super::{
    CreateOutcome, Error, Forum, ForumDraft, IdentityResolver, NewThread, ResetGate, Thread,
    ThreadDraft, ThreadLocator, User,
};

/// Service implementing the forum driving ports.
#[derive(Clone)]
pub struct ForumService {
    forums: Arc<dyn ForumRepository>,
    threads: Arc<dyn ThreadRepository>,
    resolver: IdentityResolver,
    gate: Arc<ResetGate>,
    clock: Arc<dyn Clock>,
}

impl ForumService {
    /// Create the service.
    pub fn new(
        forums: Arc<dyn ForumRepository>,
        threads: Arc<dyn ThreadRepository>,
        resolver: IdentityResolver,
        gate: Arc<ResetGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            forums,
            threads,
            resolver,
            gate,
            clock,
        }
    }

    async fn existing_forum(&self, slug: &str) -> Result<Option<Forum>, Error> {
        self.forums.find_by_slug(slug).await.map_err(map_store_error)
    }

    async fn existing_thread(&self, slug: &str) -> Result<Option<Thread>, Error> {
        self.threads
            .find(&ThreadLocator::Slug(slug.to_owned()))
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl ForumCommand for ForumService {
    async fn create_forum(&self, draft: ForumDraft) -> Result<CreateOutcome<Forum>, Error> {
        draft.validate()?;
        let _writer = self.gate.shared().await;

        let owner = self.resolver.user(&draft.user).await?;
        if let Some(existing) = self.existing_forum(&draft.slug).await? {
            return Ok(CreateOutcome::Existing(existing));
        }

        let forum = draft.into_forum(owner.nickname);
        match self.forums.insert(&forum).await {
            Ok(()) => {
                info!(slug = %forum.slug, owner = %forum.user, "forum created");
                Ok(CreateOutcome::Created(forum))
            }
            Err(StoreError::Duplicate { message }) => {
                warn!(slug = %forum.slug, %message, "concurrent forum creation won the race");
                self.existing_forum(&forum.slug)
                    .await?
                    .map(CreateOutcome::Existing)
                    .ok_or_else(|| Error::conflict(message))
            }
            Err(error) => Err(map_store_error(error)),
        }
    }

    async fn create_thread(
        &self,
        forum: &str,
        draft: ThreadDraft,
    ) -> Result<CreateOutcome<Thread>, Error> {
        let slug = draft.slug.filter(|slug| !slug.is_empty());
        if let Some(slug) = slug.as_deref() {
            validate_slug(slug)?;
        }
        let _writer = self.gate.shared().await;

        let author = self.resolver.user(&draft.author).await?;
        let forum = self.resolver.forum(forum).await?;
        let existing = match slug.as_deref() {
            Some(slug) => self.existing_thread(slug).await?,
            None => None,
        };
        if let Some(existing) = existing {
            return Ok(CreateOutcome::Existing(existing));
        }

        let created = draft.created.map_or_else(
            || store_timestamp(self.clock.as_ref()),
            to_store_precision,
        );
        let new_thread = NewThread {
            title: draft.title,
            author: author.nickname,
            forum: forum.slug,
            message: draft.message,
            slug,
            created,
        };

        match self.threads.insert(&new_thread).await {
            Ok(thread) => {
                info!(id = %thread.id, forum = %thread.forum, "thread created");
                Ok(CreateOutcome::Created(thread))
            }
            Err(StoreError::Duplicate { message }) => {
                warn!(%message, "concurrent thread creation won the race");
                let existing = match new_thread.slug.as_deref() {
                    Some(slug) => self.existing_thread(slug).await?,
                    None => None,
                };
                existing
                    .map(CreateOutcome::Existing)
                    .ok_or_else(|| Error::conflict(message))
            }
            Err(error) => Err(map_store_error(error)),
        }
    }
}

#[async_trait]
impl ForumQuery for ForumService {
    async fn get_forum(&self, slug: &str) -> Result<Forum, Error> {
        self.resolver.forum(slug).await
    }

    async fn list_threads(
        &self,
        slug: &str,
        page: PageRequest<DateTime<Utc>>,
    ) -> Result<Vec<Thread>, Error> {
        let forum = self.resolver.forum(slug).await?;
        self.forums
            .list_threads(&forum.slug, &page)
            .await
            .map_err(map_store_error)
    }

    async fn list_users(&self, slug: &str, page: PageRequest<String>) -> Result<Vec<User>, Error> {
        let forum = self.resolver.forum(slug).await?;
        self.forums
            .list_users(&forum.slug, &page)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "forum_service_tests.rs"]
mod tests;
