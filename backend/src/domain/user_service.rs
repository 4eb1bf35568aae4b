//! User domain service.
//!
//! Registration is idempotent from the caller's point of view: a request
//! colliding with stored nicknames or emails reports the colliding users
//! instead of failing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::ports::{
    StoreError, UserCommand, UserCreation, UserQuery, UserRepository, map_store_error,
};
use super::{
    CreateOutcome, Error, IdentityResolver, Nickname, ResetGate, User, UserPatch, UserProfile,
};

/// Service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    resolver: IdentityResolver,
    gate: Arc<ResetGate>,
}

impl UserService {
    /// Create the service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        resolver: IdentityResolver,
        gate: Arc<ResetGate>,
    ) -> Self {
        Self {
            users,
            resolver,
            gate,
        }
    }

    async fn conflicting(&self, user: &User) -> Result<Vec<User>, Error> {
        self.users
            .find_conflicting(&user.nickname, &user.email)
            .await
            .map_err(map_store_error)
    }
}

#[async_trait]
impl UserCommand for UserService {
    async fn create_user(
        &self,
        nickname: &str,
        profile: UserProfile,
    ) -> Result<UserCreation, Error> {
        let user = User::register(Nickname::new(nickname)?, profile)?;
        let _writer = self.gate.shared().await;

        let existing = self.conflicting(&user).await?;
        if !existing.is_empty() {
            return Ok(CreateOutcome::Existing(existing));
        }

        match self.users.insert(&user).await {
            Ok(()) => {
                info!(nickname = %user.nickname, "user registered");
                Ok(CreateOutcome::Created(user))
            }
            Err(StoreError::Duplicate { message }) => {
                warn!(nickname = %user.nickname, %message, "concurrent registration won the race");
                let existing = self.conflicting(&user).await?;
                if existing.is_empty() {
                    Err(Error::conflict(message))
                } else {
                    Ok(CreateOutcome::Existing(existing))
                }
            }
            Err(error) => Err(map_store_error(error)),
        }
    }

    async fn update_user(&self, nickname: &str, patch: UserPatch) -> Result<User, Error> {
        let _writer = self.gate.shared().await;
        let current = self.resolver.user(nickname).await?;
        let Some(updated) = patch.apply(&current) else {
            return Ok(current);
        };

        match self.users.update(&updated).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Error::not_found(format!("user {nickname} not found"))),
            Err(StoreError::Duplicate { .. }) => Err(Error::conflict(format!(
                "email {} is already used by another user",
                updated.email
            ))),
            Err(error) => Err(map_store_error(error)),
        }
    }
}

#[async_trait]
impl UserQuery for UserService {
    async fn get_user(&self, nickname: &str) -> Result<User, Error> {
        self.resolver.user(nickname).await
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
