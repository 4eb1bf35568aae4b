//! OpenAPI document for the forum REST API.
//!
//! Served by Swagger UI in debug builds and printed by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Forum, Post, PostDetails, Status, Thread, User};
use crate::inbound::http::forums::{ForumRequest, ThreadRequest};
use crate::inbound::http::posts::PostUpdateRequest;
use crate::inbound::http::threads::{PostRequest, ThreadUpdateRequest, VoteRequest};
use crate::inbound::http::users::{UserProfileRequest, UserUpdateRequest};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Forum backend API",
        description = "Users, forums, threaded posts, votes, and store maintenance."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::forums::create_forum,
        crate::inbound::http::forums::get_forum,
        crate::inbound::http::forums::create_thread,
        crate::inbound::http::forums::list_threads,
        crate::inbound::http::forums::list_users,
        crate::inbound::http::threads::create_posts,
        crate::inbound::http::threads::vote,
        crate::inbound::http::threads::get_thread,
        crate::inbound::http::threads::update_thread,
        crate::inbound::http::threads::list_posts,
        crate::inbound::http::posts::post_details,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::service::status,
        crate::inbound::http::service::clear,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Forum,
        Thread,
        Post,
        PostDetails,
        Status,
        UserProfileRequest,
        UserUpdateRequest,
        ForumRequest,
        ThreadRequest,
        PostRequest,
        VoteRequest,
        ThreadUpdateRequest,
        PostUpdateRequest,
    )),
    tags(
        (name = "users", description = "Registration and profiles"),
        (name = "forums", description = "Forums, their threads and participants"),
        (name = "threads", description = "Threads, replies, and votes"),
        (name = "posts", description = "Single post details"),
        (name = "service", description = "Store counters and reset"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
