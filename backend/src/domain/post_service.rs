//! Post domain service: batch creation, detail lookups, and edits.
//!
//! A batch is validated completely before anything is written. Authors are
//! resolved to their canonical nicknames, every parent is checked against
//! the target thread, ids are allocated in one call, and the assembled posts
//! are handed to the store as a single atomic write.
//!
//! Ids and the batch timestamp are taken together under one lock, so a
//! larger id never carries an earlier `created`. Ordering siblings by path
//! (id) therefore agrees with ordering them by `(created, id)`.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::clock::StampSequence;
use super::hierarchy::{Placement, check_parent, place};
use super::ports::{PostCommand, PostIdSequence, PostQuery, PostRepository, map_store_error};
use super::{
    Error, IdentityResolver, Post, PostDetails, PostDraft, PostId, PostPatch, Related, ResetGate,
    ThreadLocator, fold_case,
};

/// Service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    post_ids: Arc<dyn PostIdSequence>,
    resolver: IdentityResolver,
    gate: Arc<ResetGate>,
    clock: Arc<dyn Clock>,
    stamps: Arc<StampSequence>,
}

impl PostService {
    /// Create the service.
    pub fn new(
        posts: Arc<dyn PostRepository>,
        post_ids: Arc<dyn PostIdSequence>,
        resolver: IdentityResolver,
        gate: Arc<ResetGate>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            posts,
            post_ids,
            resolver,
            gate,
            clock,
            stamps: Arc::new(StampSequence::new()),
        }
    }

    async fn post(&self, id: PostId) -> Result<Post, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))
    }
}

#[async_trait]
impl PostCommand for PostService {
    async fn create_posts(
        &self,
        locator: &ThreadLocator,
        drafts: Vec<PostDraft>,
    ) -> Result<Vec<Post>, Error> {
        let _writer = self.gate.shared().await;
        let thread = self.resolver.thread(locator).await?;
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut canonical: HashMap<String, String> = HashMap::new();
        let mut parents: HashMap<PostId, Post> = HashMap::new();
        let mut authors = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            let author = match canonical.entry(fold_case(&draft.author)) {
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => {
                    let user = self.resolver.user(&draft.author).await?;
                    entry.insert(user.nickname).clone()
                }
            };
            authors.push(author);

            let Some(parent_id) = draft.parent else {
                continue;
            };
            if let Entry::Vacant(entry) = parents.entry(parent_id) {
                let found = self
                    .posts
                    .find_by_id(parent_id)
                    .await
                    .map_err(map_store_error)?;
                entry.insert(check_parent(parent_id, found.as_ref(), thread.id)?.clone());
            }
        }

        let (ids, created) = {
            let mut stamp = self.stamps.lock().await;
            let ids = self
                .post_ids
                .next_ids(drafts.len())
                .await
                .map_err(map_store_error)?;
            (ids, stamp.issue(self.clock.as_ref()))
        };
        if ids.len() != drafts.len() {
            return Err(Error::internal(format!(
                "post id sequence returned {} ids for {} posts",
                ids.len(),
                drafts.len()
            )));
        }

        let posts: Vec<Post> = drafts
            .into_iter()
            .zip(authors)
            .zip(ids)
            .map(|((draft, author), id)| {
                let parent = draft.parent.and_then(|parent| parents.get(&parent));
                place(
                    draft,
                    author,
                    Placement {
                        thread: &thread,
                        parent,
                        id,
                        created,
                    },
                )
            })
            .collect();

        self.posts
            .insert_batch(&posts)
            .await
            .map_err(map_store_error)?;
        info!(thread = %thread.id, count = posts.len(), "posts created");
        Ok(posts)
    }

    async fn update_post(&self, id: PostId, patch: PostPatch) -> Result<Post, Error> {
        let _writer = self.gate.shared().await;
        let current = self.post(id).await?;
        let Some(message) = patch.changed_message(&current) else {
            return Ok(current);
        };

        self.posts
            .update_message(id, &message)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("post {id} not found")))
    }
}

#[async_trait]
impl PostQuery for PostService {
    async fn post_details(&self, id: PostId, related: Related) -> Result<PostDetails, Error> {
        let post = self.post(id).await?;

        let author = if related.user {
            Some(self.resolver.user(&post.author).await?)
        } else {
            None
        };
        let thread = if related.thread {
            Some(self.resolver.thread(&ThreadLocator::Id(post.thread)).await?)
        } else {
            None
        };
        let forum = if related.forum {
            Some(self.resolver.forum(&post.forum).await?)
        } else {
            None
        };

        Ok(PostDetails {
            post,
            author,
            forum,
            thread,
        })
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
