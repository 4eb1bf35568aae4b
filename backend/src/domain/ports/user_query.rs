//! Driving port for user lookups.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Read-only user operations.
#[async_trait]
pub trait UserQuery: Send + Sync {
    /// Fetch a user by case-insensitive nickname.
    async fn get_user(&self, nickname: &str) -> Result<User, Error>;
}
