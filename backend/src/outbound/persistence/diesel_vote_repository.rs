//! PostgreSQL-backed `VoteRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use diesel::upsert::excluded;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};

use crate::domain::ports::{StoreError, VoteRepository};
use crate::domain::{ThreadId, Voice};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewVoteRow, VoteTotalRow};
use super::pool::DbPool;
use super::schema::{threads, votes};

/// Diesel implementation of the `VoteRepository` port.
#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const RECOUNT_SQL: &str = r#"
UPDATE threads
SET votes = (SELECT COALESCE(SUM(voice), 0)::integer FROM votes WHERE thread = $1)
WHERE id = $1
RETURNING votes
"#;

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn cast(
        &self,
        thread: ThreadId,
        nickname: &str,
        voice: Voice,
    ) -> Result<Option<i32>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewVoteRow {
            thread: thread.get(),
            nickname,
            voice: voice.value(),
        };

        // The thread row lock serialises concurrent voters on one thread.
        conn.transaction(|conn| {
            async move {
                let locked: Option<i64> = threads::table
                    .find(row.thread)
                    .select(threads::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(None);
                }

                diesel::insert_into(votes::table)
                    .values(&row)
                    .on_conflict((votes::thread, votes::nickname))
                    .do_update()
                    .set(votes::voice.eq(excluded(votes::voice)))
                    .execute(conn)
                    .await?;

                let total: VoteTotalRow = sql_query(RECOUNT_SQL)
                    .bind::<BigInt, _>(row.thread)
                    .get_result(conn)
                    .await?;
                Ok(Some(total.votes))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
