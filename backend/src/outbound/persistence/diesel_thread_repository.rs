//! PostgreSQL-backed `ThreadRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{StoreError, ThreadRepository};
use crate::domain::{NewThread, Thread, ThreadLocator, fold_case};

use super::diesel_helpers::{lower_nullable, map_diesel_error, map_pool_error};
use super::models::{ForumUserRow, NewThreadRow, ThreadRow};
use super::pool::DbPool;
use super::schema::{forum_users, forums, threads};

/// Diesel implementation of the `ThreadRepository` port.
#[derive(Clone)]
pub struct DieselThreadRepository {
    pool: DbPool,
}

impl DieselThreadRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ThreadRepository for DieselThreadRepository {
    async fn insert(&self, thread: &NewThread) -> Result<Thread, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewThreadRow {
            title: &thread.title,
            author: &thread.author,
            forum: &thread.forum,
            message: &thread.message,
            slug: thread.slug.as_deref(),
            created: thread.created,
        };

        // Thread row, forum counter and membership commit together.
        let stored: ThreadRow = conn
            .transaction(|conn| {
                async move {
                    let stored: ThreadRow = diesel::insert_into(threads::table)
                        .values(&row)
                        .returning(ThreadRow::as_returning())
                        .get_result(conn)
                        .await?;
                    diesel::update(forums::table.find(&stored.forum))
                        .set(forums::threads.eq(forums::threads + 1))
                        .execute(conn)
                        .await?;
                    diesel::insert_into(forum_users::table)
                        .values(ForumUserRow {
                            forum: &stored.forum,
                            nickname: &stored.author,
                        })
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    Ok(stored)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(Thread::from(stored))
    }

    async fn find(&self, locator: &ThreadLocator) -> Result<Option<Thread>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let query = threads::table.select(ThreadRow::as_select()).into_boxed();
        let query = match locator {
            ThreadLocator::Id(id) => query.filter(threads::id.eq(id.get())),
            ThreadLocator::Slug(slug) => {
                query.filter(lower_nullable(threads::slug).eq(fold_case(slug)))
            }
        };
        let row: Option<ThreadRow> = query
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Thread::from))
    }

    async fn update(&self, thread: &Thread) -> Result<Option<Thread>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<ThreadRow> = diesel::update(threads::table.find(thread.id.get()))
            .set((
                threads::title.eq(&thread.title),
                threads::message.eq(&thread.message),
            ))
            .returning(ThreadRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Thread::from))
    }
}
