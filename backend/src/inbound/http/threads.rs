//! Thread HTTP handlers.
//!
//! Every route addresses the thread by `{slug_or_id}`: an all-digit segment
//! is an id, anything else a slug.
//!
//! ```text
//! POST /api/thread/{slug_or_id}/create  [{"author":"jack","message":"Ahoy","parent":0}]
//! POST /api/thread/{slug_or_id}/vote    {"nickname":"jack","voice":1}
//! GET  /api/thread/{slug_or_id}/details
//! POST /api/thread/{slug_or_id}/details {"title":"Voyage home"}
//! GET  /api/thread/{slug_or_id}/posts?sort=tree&limit=10&since=42&desc=false
//! ```

use actix_web::{HttpResponse, get, post, web};
use pagination::{Direction, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, Post, PostDraft, PostId, PostListing, PostSort, Thread, ThreadLocator, ThreadPatch,
    VoteDraft,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_limit};

/// One reply in a batch. `parent` of `0` or absent makes a root post.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PostRequest {
    pub author: String,
    pub message: String,
    #[serde(default)]
    pub parent: Option<i64>,
}

impl From<PostRequest> for PostDraft {
    fn from(value: PostRequest) -> Self {
        Self {
            author: value.author,
            message: value.message,
            parent: value.parent.filter(|id| *id != 0).map(PostId::new),
        }
    }
}

/// A vote of `1` or `-1`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VoteRequest {
    pub nickname: String,
    pub voice: i32,
}

/// Partial thread update.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ThreadUpdateRequest {
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Post listing parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostsQuery {
    /// Maximum number of posts (root posts for `parent_tree`).
    pub limit: Option<i64>,
    /// Id of the post the page starts after.
    pub since: Option<i64>,
    /// `flat` (default), `tree` or `parent_tree`.
    pub sort: Option<String>,
    /// Reverse the ordering.
    pub desc: Option<bool>,
}

impl PostsQuery {
    fn into_listing(self) -> Result<PostListing, Error> {
        let sort = self
            .sort
            .as_deref()
            .map_or(Ok(PostSort::default()), str::parse)?;
        let mut page = PageRequest::new(Direction::from_desc(self.desc.unwrap_or(false)));
        if let Some(limit) = self.limit {
            page = page.with_limit(parse_limit(limit, FieldName::new("limit"))?);
        }
        if let Some(since) = self.since {
            page = page.with_since(PostId::new(since));
        }
        Ok(PostListing { sort, page })
    }
}

/// Append a batch of posts; nothing is stored if any post is rejected.
#[utoipa::path(
    post,
    path = "/api/thread/{slug_or_id}/create",
    params(("slug_or_id" = String, Path, description = "Thread id or slug")),
    request_body = [PostRequest],
    responses(
        (status = 201, description = "Posts created in request order", body = [Post]),
        (status = 404, description = "Unknown thread or author", body = Error),
        (status = 409, description = "Parent missing or in another thread", body = Error)
    ),
    tags = ["threads"],
    operation_id = "createPosts"
)]
#[post("/thread/{slug_or_id}/create")]
pub async fn create_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<Vec<PostRequest>>,
) -> ApiResult<HttpResponse> {
    let locator = ThreadLocator::parse(&path.into_inner());
    let drafts = payload.into_inner().into_iter().map(PostDraft::from).collect();
    let posts = state.posts.create_posts(&locator, drafts).await?;
    Ok(HttpResponse::Created().json(posts))
}

/// Cast or change a vote.
#[utoipa::path(
    post,
    path = "/api/thread/{slug_or_id}/vote",
    params(("slug_or_id" = String, Path, description = "Thread id or slug")),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Thread with refreshed total", body = Thread),
        (status = 400, description = "Voice is not 1 or -1", body = Error),
        (status = 404, description = "Unknown thread or voter", body = Error)
    ),
    tags = ["threads"],
    operation_id = "voteThread"
)]
#[post("/thread/{slug_or_id}/vote")]
pub async fn vote(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<Thread>> {
    let locator = ThreadLocator::parse(&path.into_inner());
    let VoteRequest { nickname, voice } = payload.into_inner();
    let thread = state
        .threads
        .vote(&locator, VoteDraft { nickname, voice })
        .await?;
    Ok(web::Json(thread))
}

/// Fetch a thread.
#[utoipa::path(
    get,
    path = "/api/thread/{slug_or_id}/details",
    params(("slug_or_id" = String, Path, description = "Thread id or slug")),
    responses(
        (status = 200, description = "Thread", body = Thread),
        (status = 404, description = "Unknown thread", body = Error)
    ),
    tags = ["threads"],
    operation_id = "getThread"
)]
#[get("/thread/{slug_or_id}/details")]
pub async fn get_thread(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Thread>> {
    let locator = ThreadLocator::parse(&path.into_inner());
    Ok(web::Json(state.threads_query.get_thread(&locator).await?))
}

/// Update a thread's title or message.
#[utoipa::path(
    post,
    path = "/api/thread/{slug_or_id}/details",
    params(("slug_or_id" = String, Path, description = "Thread id or slug")),
    request_body = ThreadUpdateRequest,
    responses(
        (status = 200, description = "Updated thread", body = Thread),
        (status = 404, description = "Unknown thread", body = Error)
    ),
    tags = ["threads"],
    operation_id = "updateThread"
)]
#[post("/thread/{slug_or_id}/details")]
pub async fn update_thread(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ThreadUpdateRequest>,
) -> ApiResult<web::Json<Thread>> {
    let locator = ThreadLocator::parse(&path.into_inner());
    let ThreadUpdateRequest { title, message } = payload.into_inner();
    let thread = state
        .threads
        .update_thread(&locator, ThreadPatch { title, message })
        .await?;
    Ok(web::Json(thread))
}

/// List a thread's posts.
#[utoipa::path(
    get,
    path = "/api/thread/{slug_or_id}/posts",
    params(("slug_or_id" = String, Path, description = "Thread id or slug"), PostsQuery),
    responses(
        (status = 200, description = "Posts in the requested order", body = [Post]),
        (status = 400, description = "Invalid sort or limit", body = Error),
        (status = 404, description = "Unknown thread or `since` post", body = Error)
    ),
    tags = ["threads"],
    operation_id = "listThreadPosts"
)]
#[get("/thread/{slug_or_id}/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<PostsQuery>,
) -> ApiResult<web::Json<Vec<Post>>> {
    let locator = ThreadLocator::parse(&path.into_inner());
    let listing = query.into_inner().into_listing()?;
    let posts = state.threads_query.list_posts(&locator, listing).await?;
    Ok(web::Json(posts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None)]
    #[case(Some(0), None)]
    #[case(Some(7), Some(PostId::new(7)))]
    fn zero_parent_is_a_root(#[case] parent: Option<i64>, #[case] expected: Option<PostId>) {
        let draft = PostDraft::from(PostRequest {
            author: "jack".to_owned(),
            message: "ahoy".to_owned(),
            parent,
        });
        assert_eq!(draft.parent, expected);
    }

    #[rstest]
    fn posts_query_defaults_to_flat_ascending() {
        let listing = PostsQuery::default().into_listing().expect("defaults");
        assert_eq!(listing.sort, PostSort::Flat);
        assert!(!listing.page.direction().is_descending());
        assert!(listing.page.since().is_none());
    }

    #[rstest]
    #[case(Some("sideways".to_owned()), None)]
    #[case(None, Some(0))]
    fn posts_query_rejects_bad_values(#[case] sort: Option<String>, #[case] limit: Option<i64>) {
        let query = PostsQuery {
            sort,
            limit,
            ..PostsQuery::default()
        };
        let error = query.into_listing().expect_err("invalid listing");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }
}
