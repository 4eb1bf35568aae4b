//! Driving port for user registration and profile edits.

use async_trait::async_trait;

use crate::domain::{CreateOutcome, Error, User, UserPatch, UserProfile};

/// Result of a registration: the new user, or every user already holding
/// the requested nickname or email.
pub type UserCreation = CreateOutcome<User, Vec<User>>;

/// Mutating user operations.
#[async_trait]
pub trait UserCommand: Send + Sync {
    /// Register a user under `nickname`.
    async fn create_user(&self, nickname: &str, profile: UserProfile)
    -> Result<UserCreation, Error>;

    /// Apply a partial profile update.
    async fn update_user(&self, nickname: &str, patch: UserPatch) -> Result<User, Error>;
}
