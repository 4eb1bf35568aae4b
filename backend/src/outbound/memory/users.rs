//! `UserRepository` over the in-process state.

use async_trait::async_trait;

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{User, fold_case};

use super::MemoryStore;

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut state = self.lock()?;
        let nickname = fold_case(&user.nickname);
        let email = fold_case(&user.email);
        if state.users.iter().any(|existing| {
            fold_case(&existing.nickname) == nickname || fold_case(&existing.email) == email
        }) {
            return Err(StoreError::duplicate(format!(
                "user {} or email {} already exists",
                user.nickname, user.email
            )));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        let state = self.lock()?;
        Ok(state.user(nickname).cloned())
    }

    async fn find_conflicting(
        &self,
        nickname: &str,
        email: &str,
    ) -> Result<Vec<User>, StoreError> {
        let state = self.lock()?;
        let nickname = fold_case(nickname);
        let email = fold_case(email);
        let mut matches: Vec<User> = state
            .users
            .iter()
            .filter(|user| fold_case(&user.nickname) == nickname || fold_case(&user.email) == email)
            .cloned()
            .collect();
        matches.sort_by_key(|user| fold_case(&user.nickname));
        Ok(matches)
    }

    async fn update(&self, user: &User) -> Result<Option<User>, StoreError> {
        let mut state = self.lock()?;
        let nickname = fold_case(&user.nickname);
        let email = fold_case(&user.email);
        let Some(index) = state
            .users
            .iter()
            .position(|existing| fold_case(&existing.nickname) == nickname)
        else {
            return Ok(None);
        };
        let taken = state
            .users
            .iter()
            .enumerate()
            .any(|(other, existing)| other != index && fold_case(&existing.email) == email);
        if taken {
            return Err(StoreError::duplicate(format!(
                "email {} already exists",
                user.email
            )));
        }

        let stored = &mut state.users[index];
        stored.fullname.clone_from(&user.fullname);
        stored.about.clone_from(&user.about);
        stored.email.clone_from(&user.email);
        Ok(Some(stored.clone()))
    }
}
