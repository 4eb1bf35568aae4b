//! Post id allocation from the `posts_id_seq` sequence.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;

use crate::domain::PostId;
use crate::domain::ports::{PostIdSequence, StoreError};

use super::diesel_helpers::{map_diesel_error, map_pool_error, row_count};
use super::models::AllocatedIdRow;
use super::pool::DbPool;

/// Diesel implementation of the `PostIdSequence` port.
#[derive(Clone)]
pub struct DieselPostIdSequence {
    pool: DbPool,
}

impl DieselPostIdSequence {
    /// Create a sequence handle over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const NEXT_IDS_SQL: &str = r#"
SELECT id FROM (
    SELECT nextval('posts_id_seq') AS id FROM generate_series(1, $1)
) allocated
ORDER BY id
"#;

const RESET_SQL: &str = "ALTER SEQUENCE posts_id_seq RESTART WITH 1";

#[async_trait]
impl PostIdSequence for DieselPostIdSequence {
    async fn next_ids(&self, count: usize) -> Result<Vec<PostId>, StoreError> {
        if count == 0 {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AllocatedIdRow> = sql_query(NEXT_IDS_SQL)
            .bind::<BigInt, _>(row_count(count))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(|row| PostId::new(row.id)).collect())
    }

    async fn reset(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        sql_query(RESET_SQL)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}
