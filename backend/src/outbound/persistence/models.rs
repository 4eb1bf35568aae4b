//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; conversions into domain types live
//! next to each struct.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};

use crate::domain::{Forum, Post, PostId, PostPath, Thread, ThreadId, User};

use super::schema::{forum_users, forums, posts, threads, users, votes};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub nickname: String,
    pub fullname: String,
    pub about: String,
    pub email: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            nickname: row.nickname,
            fullname: row.fullname,
            about: row.about,
            email: row.email,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub nickname: &'a str,
    pub fullname: &'a str,
    pub about: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            nickname: &user.nickname,
            fullname: &user.fullname,
            about: &user.about,
            email: &user.email,
        }
    }
}

/// Profile columns rewritten by a user update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub fullname: &'a str,
    pub about: &'a str,
    pub email: &'a str,
}

// ---------------------------------------------------------------------------
// Forums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = forums)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ForumRow {
    pub slug: String,
    pub title: String,
    pub owner: String,
    pub posts: i64,
    pub threads: i64,
}

impl From<ForumRow> for Forum {
    fn from(row: ForumRow) -> Self {
        Self {
            title: row.title,
            user: row.owner,
            slug: row.slug,
            posts: row.posts,
            threads: row.threads,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = forums)]
pub(crate) struct NewForumRow<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub owner: &'a str,
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = threads)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ThreadRow {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub forum: String,
    pub message: String,
    pub votes: i32,
    pub slug: Option<String>,
    pub created: DateTime<Utc>,
}

impl From<ThreadRow> for Thread {
    fn from(row: ThreadRow) -> Self {
        Self {
            id: ThreadId::new(row.id),
            title: row.title,
            author: row.author,
            forum: row.forum,
            message: row.message,
            votes: row.votes,
            slug: row.slug,
            created: row.created,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = threads)]
pub(crate) struct NewThreadRow<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub forum: &'a str,
    pub message: &'a str,
    pub slug: Option<&'a str>,
    pub created: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// Post columns except `path_desc`, which only serves ordering.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub parent: Option<i64>,
    pub author: String,
    pub message: String,
    pub is_edited: bool,
    pub forum: String,
    pub thread: i64,
    pub created: DateTime<Utc>,
    pub path: Vec<i64>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            parent: row.parent.map(PostId::new),
            author: row.author,
            message: row.message,
            is_edited: row.is_edited,
            forum: row.forum,
            thread: ThreadId::new(row.thread),
            created: row.created,
            path: PostPath::from_segments(row.path),
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub id: i64,
    pub parent: Option<i64>,
    pub author: &'a str,
    pub message: &'a str,
    pub is_edited: bool,
    pub forum: &'a str,
    pub thread: i64,
    pub created: DateTime<Utc>,
    pub path: Vec<i64>,
    pub path_desc: Vec<i64>,
}

impl<'a> From<&'a Post> for NewPostRow<'a> {
    fn from(post: &'a Post) -> Self {
        Self {
            id: post.id.get(),
            parent: post.parent.map(PostId::get),
            author: &post.author,
            message: &post.message,
            is_edited: post.is_edited,
            forum: &post.forum,
            thread: post.thread.get(),
            created: post.created,
            path: post.path.segments().to_vec(),
            path_desc: post.path.descending_key(),
        }
    }
}

// ---------------------------------------------------------------------------
// Votes, membership and counters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = votes)]
pub(crate) struct NewVoteRow<'a> {
    pub thread: i64,
    pub nickname: &'a str,
    pub voice: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = forum_users)]
pub(crate) struct ForumUserRow<'a> {
    pub forum: &'a str,
    pub nickname: &'a str,
}

#[derive(Debug, QueryableByName)]
pub(crate) struct VoteTotalRow {
    #[diesel(sql_type = Integer)]
    pub votes: i32,
}

#[derive(Debug, QueryableByName)]
pub(crate) struct AllocatedIdRow {
    #[diesel(sql_type = BigInt)]
    pub id: i64,
}

#[derive(Debug, QueryableByName)]
pub(crate) struct StatusRow {
    #[diesel(sql_type = BigInt)]
    pub user_count: i64,
    #[diesel(sql_type = BigInt)]
    pub forum_count: i64,
    #[diesel(sql_type = BigInt)]
    pub thread_count: i64,
    #[diesel(sql_type = BigInt)]
    pub post_count: i64,
}
