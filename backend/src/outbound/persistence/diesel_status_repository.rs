//! PostgreSQL-backed `StatusRepository`.

use async_trait::async_trait;
use diesel::sql_query;
use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::Status;
use crate::domain::ports::{StatusRepository, StoreError};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::StatusRow;
use super::pool::DbPool;

/// Diesel implementation of the `StatusRepository` port.
#[derive(Clone)]
pub struct DieselStatusRepository {
    pool: DbPool,
}

impl DieselStatusRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const COUNTS_SQL: &str = r#"
SELECT
    (SELECT COUNT(*) FROM users) AS user_count,
    (SELECT COUNT(*) FROM forums) AS forum_count,
    (SELECT COUNT(*) FROM threads) AS thread_count,
    (SELECT COUNT(*) FROM posts) AS post_count
"#;

/// Empties every forum table and restarts the sequences they own.
const CLEAR_SQL: &str =
    "TRUNCATE TABLE votes, forum_users, posts, threads, forums, users RESTART IDENTITY CASCADE";

#[async_trait]
impl StatusRepository for DieselStatusRepository {
    async fn counts(&self) -> Result<Status, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: StatusRow = sql_query(COUNTS_SQL)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Status {
            user: row.user_count,
            forum: row.forum_count,
            thread: row.thread_count,
            post: row.post_count,
        })
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(CLEAR_SQL)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        info!("forum tables truncated");
        Ok(())
    }
}
