//! PostgreSQL-backed `ForumRepository`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Nullable, Text};
use diesel_async::RunQueryDsl;
use pagination::{Bound, PageRequest};

use crate::domain::ports::{ForumRepository, StoreError};
use crate::domain::{Forum, Thread, User, fold_case};

use super::diesel_helpers::{lower, map_diesel_error, map_pool_error};
use super::models::{ForumRow, NewForumRow, ThreadRow, UserRow};
use super::pool::DbPool;
use super::schema::{forums, threads};

/// Diesel implementation of the `ForumRepository` port.
#[derive(Clone)]
pub struct DieselForumRepository {
    pool: DbPool,
}

impl DieselForumRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Participants of a forum ordered by their byte-wise folded nickname.
fn forum_users_sql(page: &PageRequest<String>) -> String {
    let direction = page.direction();
    format!(
        r#"
SELECT u.nickname, u.fullname, u.about, u.email
FROM forum_users fu
JOIN users u ON u.nickname = fu.nickname
WHERE fu.forum = $1
  AND ($2::text IS NULL OR lower(u.nickname) COLLATE "C" {op} $2 COLLATE "C")
ORDER BY lower(u.nickname) COLLATE "C" {dir}
LIMIT $3
"#,
        op = direction.sql_operator(Bound::Exclusive),
        dir = direction.sql_keyword(),
    )
}

#[async_trait]
impl ForumRepository for DieselForumRepository {
    async fn insert(&self, forum: &Forum) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(forums::table)
            .values(NewForumRow {
                slug: &forum.slug,
                title: &forum.title,
                owner: &forum.user,
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Forum>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ForumRow> = forums::table
            .filter(lower(forums::slug).eq(fold_case(slug)))
            .select(ForumRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Forum::from))
    }

    async fn list_threads(
        &self,
        forum: &str,
        page: &PageRequest<DateTime<Utc>>,
    ) -> Result<Vec<Thread>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let descending = page.direction().is_descending();

        let mut query = threads::table
            .filter(threads::forum.eq(forum))
            .select(ThreadRow::as_select())
            .into_boxed();
        if let Some(since) = page.since() {
            query = if descending {
                query.filter(threads::created.le(*since))
            } else {
                query.filter(threads::created.ge(*since))
            };
        }
        query = if descending {
            query.order_by((threads::created.desc(), threads::id.desc()))
        } else {
            query.order_by((threads::created.asc(), threads::id.asc()))
        };
        if let Some(limit) = page.limit() {
            query = query.limit(limit.as_i64());
        }

        let rows: Vec<ThreadRow> = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Thread::from).collect())
    }

    async fn list_users(
        &self,
        forum: &str,
        page: &PageRequest<String>,
    ) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let since = page.since().map(|since| fold_case(since));
        let rows: Vec<UserRow> = sql_query(forum_users_sql(page))
            .bind::<Text, _>(forum)
            .bind::<Nullable<Text>, _>(since)
            .bind::<Nullable<BigInt>, _>(page.limit().map(|limit| limit.as_i64()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}
