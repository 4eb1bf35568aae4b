//! Store-wide HTTP handlers: counters and reset.

use actix_web::{HttpResponse, get, post, web};

use crate::domain::{Error, Status};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Count users, forums, threads, and posts.
#[utoipa::path(
    get,
    path = "/api/service/status",
    responses(
        (status = 200, description = "Store counters", body = Status),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["service"],
    operation_id = "status"
)]
#[get("/service/status")]
pub async fn status(state: web::Data<HttpState>) -> ApiResult<web::Json<Status>> {
    Ok(web::Json(state.status.status().await?))
}

/// Delete every record and restart id assignment.
#[utoipa::path(
    post,
    path = "/api/service/clear",
    responses(
        (status = 200, description = "Store emptied"),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["service"],
    operation_id = "clear"
)]
#[post("/service/clear")]
pub async fn clear(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    state.maintenance.clear().await?;
    Ok(HttpResponse::Ok().finish())
}
