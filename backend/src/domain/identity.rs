//! Resolution of caller-supplied identifiers to stored entities.
//!
//! Nicknames and slugs arrive in whatever casing the client used. Every
//! service resolves them here first and then works only with the canonical
//! spelling held by the store, so two spellings of one name can never create
//! two records.

use std::sync::Arc;

use tracing::debug;

use super::ports::{ForumRepository, ThreadRepository, UserRepository, map_store_error};
use super::{Error, Forum, Thread, ThreadLocator, User};

/// Looks up users, forums, and threads, failing with `NotFound` when absent.
#[derive(Clone)]
pub struct IdentityResolver {
    users: Arc<dyn UserRepository>,
    forums: Arc<dyn ForumRepository>,
    threads: Arc<dyn ThreadRepository>,
}

impl IdentityResolver {
    /// Create a resolver over the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        forums: Arc<dyn ForumRepository>,
        threads: Arc<dyn ThreadRepository>,
    ) -> Self {
        Self {
            users,
            forums,
            threads,
        }
    }

    /// Resolve a nickname in any casing.
    pub async fn user(&self, nickname: &str) -> Result<User, Error> {
        self.users
            .find_by_nickname(nickname)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                debug!(nickname, "user lookup missed");
                Error::not_found(format!("user {nickname} not found"))
            })
    }

    /// Resolve a forum slug in any casing.
    pub async fn forum(&self, slug: &str) -> Result<Forum, Error> {
        self.forums
            .find_by_slug(slug)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                debug!(slug, "forum lookup missed");
                Error::not_found(format!("forum {slug} not found"))
            })
    }

    /// Resolve a thread by id or slug.
    pub async fn thread(&self, locator: &ThreadLocator) -> Result<Thread, Error> {
        self.threads
            .find(locator)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| {
                debug!(%locator, "thread lookup missed");
                Error::not_found(format!("thread {locator} not found"))
            })
    }
}
