//! Thread domain service: lookups, edits, votes, and post listings.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;
use tracing::debug;

use super::ports::{
    PostRepository, ThreadCommand, ThreadQuery, ThreadRepository, VoteRepository, map_store_error,
};
use super::{
    Error, IdentityResolver, Post, PostListing, ResetGate, Thread, ThreadLocator, ThreadPatch,
    Voice, VoteDraft,
};

/// Service implementing the thread driving ports.
#[derive(Clone)]
pub struct ThreadService {
    threads: Arc<dyn ThreadRepository>,
    posts: Arc<dyn PostRepository>,
    votes: Arc<dyn VoteRepository>,
    resolver: IdentityResolver,
    gate: Arc<ResetGate>,
}

impl ThreadService {
    /// Create the service.
    pub fn new(
        threads: Arc<dyn ThreadRepository>,
        posts: Arc<dyn PostRepository>,
        votes: Arc<dyn VoteRepository>,
        resolver: IdentityResolver,
        gate: Arc<ResetGate>,
    ) -> Self {
        Self {
            threads,
            posts,
            votes,
            resolver,
            gate,
        }
    }

    /// Swap the listing's post id boundary for the stored post it names.
    async fn resolve_page(
        &self,
        thread: &Thread,
        listing: &PostListing,
    ) -> Result<PageRequest<Post>, Error> {
        let mut page = PageRequest::new(listing.page.direction());
        if let Some(limit) = listing.page.limit() {
            page = page.with_limit(limit);
        }
        let Some(since) = listing.page.since().copied() else {
            return Ok(page);
        };

        let cursor = self
            .posts
            .find_by_id(since)
            .await
            .map_err(map_store_error)?
            .filter(|post| post.thread == thread.id)
            .ok_or_else(|| {
                Error::not_found(format!("post {since} not found in thread {}", thread.id))
            })?;
        Ok(page.with_since(cursor))
    }
}

#[async_trait]
impl ThreadCommand for ThreadService {
    async fn update_thread(
        &self,
        locator: &ThreadLocator,
        patch: ThreadPatch,
    ) -> Result<Thread, Error> {
        let _writer = self.gate.shared().await;
        let current = self.resolver.thread(locator).await?;
        let Some(updated) = patch.apply(&current) else {
            return Ok(current);
        };

        self.threads
            .update(&updated)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("thread {locator} not found")))
    }

    async fn vote(&self, locator: &ThreadLocator, vote: VoteDraft) -> Result<Thread, Error> {
        let voice = Voice::try_from(vote.voice)?;
        let _writer = self.gate.shared().await;

        let thread = self.resolver.thread(locator).await?;
        let voter = self.resolver.user(&vote.nickname).await?;
        let votes = self
            .votes
            .cast(thread.id, &voter.nickname, voice)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("thread {locator} not found")))?;

        debug!(thread = %thread.id, voter = %voter.nickname, votes, "vote recorded");
        Ok(Thread { votes, ..thread })
    }
}

#[async_trait]
impl ThreadQuery for ThreadService {
    async fn get_thread(&self, locator: &ThreadLocator) -> Result<Thread, Error> {
        self.resolver.thread(locator).await
    }

    async fn list_posts(
        &self,
        locator: &ThreadLocator,
        listing: PostListing,
    ) -> Result<Vec<Post>, Error> {
        let thread = self.resolver.thread(locator).await?;
        let page = self.resolve_page(&thread, &listing).await?;
        self.posts
            .list(thread.id, listing.sort, &page)
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "thread_service_tests.rs"]
mod tests;
