//! Forum HTTP handlers.
//!
//! ```text
//! POST /api/forum/create {"title":"Pirates","user":"jack","slug":"pirates"}
//! GET  /api/forum/{slug}/details
//! GET  /api/forum/{slug}/threads?limit=10&since=2024-03-01T12:00:00Z&desc=true
//! GET  /api/forum/{slug}/users?limit=10&since=anne
//! POST /api/forum/{slug}/create {"title":"Voyage","author":"jack","message":"Ahoy"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateOutcome, Error, Forum, ForumDraft, Thread, ThreadDraft, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, ListingQuery, parse_rfc3339_timestamp};

/// Forum creation payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ForumRequest {
    pub title: String,
    /// Owner nickname in any casing.
    pub user: String,
    pub slug: String,
}

impl From<ForumRequest> for ForumDraft {
    fn from(value: ForumRequest) -> Self {
        Self {
            title: value.title,
            slug: value.slug,
            user: value.user,
        }
    }
}

/// Thread creation payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ThreadRequest {
    pub title: String,
    pub author: String,
    pub message: String,
    #[serde(default)]
    pub slug: Option<String>,
    /// Defaults to the time of creation.
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
}

impl From<ThreadRequest> for ThreadDraft {
    fn from(value: ThreadRequest) -> Self {
        Self {
            title: value.title,
            author: value.author,
            message: value.message,
            slug: value.slug,
            created: value.created,
        }
    }
}

fn created_or_conflict<T: Serialize>(outcome: CreateOutcome<T>) -> HttpResponse {
    match outcome {
        CreateOutcome::Created(value) => HttpResponse::Created().json(value),
        CreateOutcome::Existing(value) => HttpResponse::Conflict().json(value),
    }
}

/// Create a forum owned by an existing user.
#[utoipa::path(
    post,
    path = "/api/forum/create",
    request_body = ForumRequest,
    responses(
        (status = 201, description = "Forum created", body = Forum),
        (status = 409, description = "Slug taken; the stored forum", body = Forum),
        (status = 404, description = "Unknown owner", body = Error)
    ),
    tags = ["forums"],
    operation_id = "createForum"
)]
#[post("/forum/create")]
pub async fn create_forum(
    state: web::Data<HttpState>,
    payload: web::Json<ForumRequest>,
) -> ApiResult<HttpResponse> {
    let outcome = state.forums.create_forum(payload.into_inner().into()).await?;
    Ok(created_or_conflict(outcome))
}

/// Fetch a forum with its counters.
#[utoipa::path(
    get,
    path = "/api/forum/{slug}/details",
    params(("slug" = String, Path, description = "Forum slug in any casing")),
    responses(
        (status = 200, description = "Forum", body = Forum),
        (status = 404, description = "Unknown forum", body = Error)
    ),
    tags = ["forums"],
    operation_id = "getForum"
)]
#[get("/forum/{slug}/details")]
pub async fn get_forum(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Forum>> {
    let forum = state.forums_query.get_forum(&path.into_inner()).await?;
    Ok(web::Json(forum))
}

/// Create a thread in a forum.
#[utoipa::path(
    post,
    path = "/api/forum/{slug}/create",
    params(("slug" = String, Path, description = "Forum slug in any casing")),
    request_body = ThreadRequest,
    responses(
        (status = 201, description = "Thread created", body = Thread),
        (status = 409, description = "Thread slug taken; the stored thread", body = Thread),
        (status = 404, description = "Unknown forum or author", body = Error)
    ),
    tags = ["forums"],
    operation_id = "createThread"
)]
#[post("/forum/{slug}/create")]
pub async fn create_thread(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ThreadRequest>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .forums
        .create_thread(&path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(created_or_conflict(outcome))
}

/// List a forum's threads by creation time; `since` is inclusive.
#[utoipa::path(
    get,
    path = "/api/forum/{slug}/threads",
    params(("slug" = String, Path, description = "Forum slug in any casing"), ListingQuery),
    responses(
        (status = 200, description = "Threads", body = [Thread]),
        (status = 400, description = "Invalid paging parameters", body = Error),
        (status = 404, description = "Unknown forum", body = Error)
    ),
    tags = ["forums"],
    operation_id = "listForumThreads"
)]
#[get("/forum/{slug}/threads")]
pub async fn list_threads(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<web::Json<Vec<Thread>>> {
    let page = query
        .into_inner()
        .into_page(|since| parse_rfc3339_timestamp(since, FieldName::new("since")))?;
    let threads = state
        .forums_query
        .list_threads(&path.into_inner(), page)
        .await?;
    Ok(web::Json(threads))
}

/// List users who wrote in a forum, by nickname; `since` is exclusive.
#[utoipa::path(
    get,
    path = "/api/forum/{slug}/users",
    params(("slug" = String, Path, description = "Forum slug in any casing"), ListingQuery),
    responses(
        (status = 200, description = "Participants", body = [User]),
        (status = 400, description = "Invalid paging parameters", body = Error),
        (status = 404, description = "Unknown forum", body = Error)
    ),
    tags = ["forums"],
    operation_id = "listForumUsers"
)]
#[get("/forum/{slug}/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    query: web::Query<ListingQuery>,
) -> ApiResult<web::Json<Vec<User>>> {
    let page = query.into_inner().into_page(Ok)?;
    let users = state
        .forums_query
        .list_users(&path.into_inner(), page)
        .await?;
    Ok(web::Json(users))
}
