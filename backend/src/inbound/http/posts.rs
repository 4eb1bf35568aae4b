//! Post HTTP handlers.
//!
//! ```text
//! GET  /api/post/{id}/details?related=user,forum,thread
//! POST /api/post/{id}/details {"message":"Ahoy, mates"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, Post, PostDetails, PostId, PostPatch, Related};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Related entities to attach, comma separated.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailsQuery {
    /// Any of `user`, `forum`, `thread`.
    pub related: Option<String>,
}

/// Post edit payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PostUpdateRequest {
    pub message: Option<String>,
}

/// Fetch a post with optional related entities.
#[utoipa::path(
    get,
    path = "/api/post/{id}/details",
    params(("id" = i64, Path, description = "Post id"), DetailsQuery),
    responses(
        (status = 200, description = "Post details", body = PostDetails),
        (status = 400, description = "Unknown related name", body = Error),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/post/{id}/details")]
pub async fn post_details(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    query: web::Query<DetailsQuery>,
) -> ApiResult<web::Json<PostDetails>> {
    let related = query
        .into_inner()
        .related
        .as_deref()
        .map_or(Ok(Related::default()), Related::parse)?;
    let details = state
        .posts_query
        .post_details(PostId::new(path.into_inner()), related)
        .await?;
    Ok(web::Json(details))
}

/// Edit a post's message; an unchanged message keeps `isEdited` as is.
#[utoipa::path(
    post,
    path = "/api/post/{id}/details",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostUpdateRequest,
    responses(
        (status = 200, description = "Post", body = Post),
        (status = 404, description = "Unknown post", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[post("/post/{id}/details")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<PostUpdateRequest>,
) -> ApiResult<web::Json<Post>> {
    let patch = PostPatch {
        message: payload.into_inner().message,
    };
    let post = state
        .posts
        .update_post(PostId::new(path.into_inner()), patch)
        .await?;
    Ok(web::Json(post))
}
