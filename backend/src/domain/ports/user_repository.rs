//! Port abstraction for user persistence.
//!
//! Nickname and email lookups are case-insensitive; stored values keep the
//! casing they were registered with.

use async_trait::async_trait;

use crate::domain::User;

use super::StoreError;

/// Storage of user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Store a new user.
    ///
    /// Fails with [`StoreError::Duplicate`] when the nickname or email is
    /// already taken.
    async fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Fetch a user by nickname.
    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError>;

    /// Fetch every user whose nickname or email matches, ordered by nickname.
    async fn find_conflicting(&self, nickname: &str, email: &str)
    -> Result<Vec<User>, StoreError>;

    /// Overwrite the profile fields of the user named by `user.nickname`.
    ///
    /// Returns `None` when the user no longer exists and fails with
    /// [`StoreError::Duplicate`] when the new email belongs to someone else.
    async fn update(&self, user: &User) -> Result<Option<User>, StoreError>;
}
