//! PostgreSQL-backed `PostRepository`.
//!
//! Listings push ordering and paging into SQL. Tree order uses the `path`
//! array column, or `path_desc` (negated segments) when descending, so both
//! directions are a plain ascending index scan past the cursor.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Array, BigInt, Nullable, Timestamptz};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use pagination::{Bound, Direction, PageRequest};

use crate::domain::ports::{PostRepository, StoreError};
use crate::domain::{Post, PostId, PostSort, ThreadId};

use super::diesel_helpers::{map_diesel_error, map_pool_error, row_count};
use super::models::{ForumUserRow, NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::{forum_users, forums, posts};

/// Diesel implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a repository over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "p.id, p.parent, p.author, p.message, p.is_edited, p.forum, p.thread, p.created, p.path";

fn flat_sql(direction: Direction) -> String {
    format!(
        "SELECT {POST_COLUMNS} FROM posts p \
         WHERE p.thread = $1 \
           AND ($2::timestamptz IS NULL OR (p.created, p.id) {op} ($2, $3)) \
         ORDER BY p.created {dir}, p.id {dir} \
         LIMIT $4",
        op = direction.sql_operator(Bound::Exclusive),
        dir = direction.sql_keyword(),
    )
}

fn tree_key(direction: Direction) -> &'static str {
    if direction.is_descending() {
        "path_desc"
    } else {
        "path"
    }
}

fn tree_sql(direction: Direction) -> String {
    format!(
        "SELECT {POST_COLUMNS} FROM posts p \
         WHERE p.thread = $1 \
           AND ($2::bigint[] IS NULL OR p.{key} > $2) \
         ORDER BY p.{key} ASC \
         LIMIT $3",
        key = tree_key(direction),
    )
}

fn parent_tree_sql(direction: Direction) -> String {
    format!(
        "WITH roots AS ( \
             SELECT r.id FROM posts r \
             WHERE r.thread = $1 AND r.parent IS NULL \
               AND ($2::bigint IS NULL OR r.id {op} $2) \
             ORDER BY r.id {dir} \
             LIMIT $3 \
         ) \
         SELECT {POST_COLUMNS} FROM posts p \
         JOIN roots ON p.path[1] = roots.id \
         WHERE p.thread = $1 \
         ORDER BY p.path[1] {dir}, p.path ASC",
        op = direction.sql_operator(Bound::Exclusive),
        dir = direction.sql_keyword(),
    )
}

fn tree_cursor(post: &Post, direction: Direction) -> Vec<i64> {
    if direction.is_descending() {
        post.path.descending_key()
    } else {
        post.path.segments().to_vec()
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PostRow> = posts::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Post::from))
    }

    async fn insert_batch(&self, batch: &[Post]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }

        let rows: Vec<NewPostRow<'_>> = batch.iter().map(NewPostRow::from).collect();
        let mut per_forum: BTreeMap<&str, usize> = BTreeMap::new();
        let mut members: BTreeSet<(&str, &str)> = BTreeSet::new();
        for post in batch {
            *per_forum.entry(post.forum.as_str()).or_default() += 1;
            members.insert((post.forum.as_str(), post.author.as_str()));
        }
        let members: Vec<ForumUserRow<'_>> = members
            .into_iter()
            .map(|(forum, nickname)| ForumUserRow { forum, nickname })
            .collect();

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // Posts, counters and membership commit or fail as one unit.
        conn.transaction(|conn| {
            async move {
                diesel::insert_into(posts::table)
                    .values(&rows)
                    .execute(conn)
                    .await?;
                for (forum, added) in &per_forum {
                    diesel::update(forums::table.find(*forum))
                        .set(forums::posts.eq(forums::posts + row_count(*added)))
                        .execute(conn)
                        .await?;
                }
                diesel::insert_into(forum_users::table)
                    .values(&members)
                    .on_conflict_do_nothing()
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn list(
        &self,
        thread: ThreadId,
        sort: PostSort,
        page: &PageRequest<Post>,
    ) -> Result<Vec<Post>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let direction = page.direction();
        let limit = page.limit().map(|limit| limit.as_i64());

        let rows: Vec<PostRow> = match sort {
            PostSort::Flat => {
                sql_query(flat_sql(direction))
                    .bind::<BigInt, _>(thread.get())
                    .bind::<Nullable<Timestamptz>, _>(page.since().map(|since| since.created))
                    .bind::<Nullable<BigInt>, _>(page.since().map(|since| since.id.get()))
                    .bind::<Nullable<BigInt>, _>(limit)
                    .load::<PostRow>(&mut conn)
                    .await
            }
            PostSort::Tree => {
                sql_query(tree_sql(direction))
                    .bind::<BigInt, _>(thread.get())
                    .bind::<Nullable<Array<BigInt>>, _>(
                        page.since().map(|since| tree_cursor(since, direction)),
                    )
                    .bind::<Nullable<BigInt>, _>(limit)
                    .load::<PostRow>(&mut conn)
                    .await
            }
            PostSort::ParentTree => {
                sql_query(parent_tree_sql(direction))
                    .bind::<BigInt, _>(thread.get())
                    .bind::<Nullable<BigInt>, _>(
                        page.since()
                            .and_then(|since| since.path.root_id())
                            .map(PostId::get),
                    )
                    .bind::<Nullable<BigInt>, _>(limit)
                    .load::<PostRow>(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update_message(
        &self,
        id: PostId,
        message: &str,
    ) -> Result<Option<Post>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set((posts::message.eq(message), posts::is_edited.eq(true)))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Post::from))
    }
}
