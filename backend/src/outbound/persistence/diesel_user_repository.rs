//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{User, fold_case};

use super::diesel_helpers::{lower, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::users;

/// Diesel implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(users::table)
            .values(NewUserRow::from(user))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_nickname(&self, nickname: &str) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(lower(users::nickname).eq(fold_case(nickname)))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn find_conflicting(
        &self,
        nickname: &str,
        email: &str,
    ) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = users::table
            .filter(
                lower(users::nickname)
                    .eq(fold_case(nickname))
                    .or(lower(users::email).eq(fold_case(email))),
            )
            .select(UserRow::as_select())
            .order_by(lower(users::nickname))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn update(&self, user: &User) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserUpdate {
            fullname: &user.fullname,
            about: &user.about,
            email: &user.email,
        };
        let row: Option<UserRow> =
            diesel::update(users::table.filter(lower(users::nickname).eq(fold_case(&user.nickname))))
                .set(&changes)
                .returning(UserRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }
}
