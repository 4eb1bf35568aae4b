//! User HTTP handlers.
//!
//! ```text
//! POST /api/user/{nickname}/create {"fullname":"Jack Sparrow","about":"","email":"jack@pearl.sea"}
//! GET  /api/user/{nickname}/profile
//! POST /api/user/{nickname}/profile {"email":"captain@pearl.sea"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CreateOutcome, Error, User, UserPatch, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Registration payload; the nickname comes from the path.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UserProfileRequest {
    pub fullname: String,
    #[serde(default)]
    pub about: String,
    pub email: String,
}

impl From<UserProfileRequest> for UserProfile {
    fn from(value: UserProfileRequest) -> Self {
        Self {
            fullname: value.fullname,
            about: value.about,
            email: value.email,
        }
    }
}

/// Partial profile update; absent or empty fields keep their value.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UserUpdateRequest {
    pub fullname: Option<String>,
    pub about: Option<String>,
    pub email: Option<String>,
}

impl From<UserUpdateRequest> for UserPatch {
    fn from(value: UserUpdateRequest) -> Self {
        Self {
            fullname: value.fullname,
            about: value.about,
            email: value.email,
        }
    }
}

/// Register a user.
///
/// Repeating a registration whose nickname or email is taken answers `409`
/// with every clashing user.
#[utoipa::path(
    post,
    path = "/api/user/{nickname}/create",
    params(("nickname" = String, Path, description = "Requested nickname")),
    request_body = UserProfileRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 409, description = "Nickname or email taken", body = [User]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/user/{nickname}/create")]
pub async fn create_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserProfileRequest>,
) -> ApiResult<HttpResponse> {
    let nickname = path.into_inner();
    match state
        .users
        .create_user(&nickname, payload.into_inner().into())
        .await?
    {
        CreateOutcome::Created(user) => Ok(HttpResponse::Created().json(user)),
        CreateOutcome::Existing(users) => Ok(HttpResponse::Conflict().json(users)),
    }
}

/// Fetch a user profile.
#[utoipa::path(
    get,
    path = "/api/user/{nickname}/profile",
    params(("nickname" = String, Path, description = "Nickname in any casing")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Unknown user", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/user/{nickname}/profile")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let user = state.users_query.get_user(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Update a user profile.
#[utoipa::path(
    post,
    path = "/api/user/{nickname}/profile",
    params(("nickname" = String, Path, description = "Nickname in any casing")),
    request_body = UserUpdateRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "Unknown user", body = Error),
        (status = 409, description = "Email owned by another user", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[post("/user/{nickname}/profile")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UserUpdateRequest>,
) -> ApiResult<web::Json<User>> {
    let user = state
        .users
        .update_user(&path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(user))
}
