//! Shared helpers for the HTTP integration suites.
//!
//! Every suite drives the full `/api` routing table the same way the server
//! wires it, over a fresh in-memory store or an embedded PostgreSQL database.

#![allow(dead_code, reason = "each suite uses a different subset")]

pub mod embedded_postgres;
pub mod scenarios;

use std::sync::Arc;

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::DefaultClock;
use serde_json::{Value, json};

use forum_backend::Trace;
use forum_backend::domain::ForumServices;
use forum_backend::domain::ports::StorePorts;
use forum_backend::inbound::http::configure_api;
use forum_backend::inbound::http::error::{json_error_handler, query_error_handler};
use forum_backend::inbound::http::state::HttpState;
use forum_backend::outbound::memory::MemoryStore;

/// Application over an empty in-memory store.
pub fn forum_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    forum_app_over(MemoryStore::new().into_ports())
}

/// Application over the given store ports.
pub fn forum_app_over(
    ports: StorePorts,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let services = ForumServices::new(ports, Arc::new(DefaultClock));
    App::new()
        .app_data(web::Data::new(HttpState::from(services)))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .configure(configure_api)
}

/// Send `request` and decode the JSON body; empty bodies decode as `null`.
pub async fn send(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    request: test::TestRequest,
) -> (StatusCode, Value) {
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    (status, body)
}

/// `POST` a JSON payload.
pub fn post_json(uri: &str, payload: &Value) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_json(payload)
}

/// `GET` a path.
pub fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get().uri(uri)
}

/// Registration payload for `nickname` with a derived email.
pub fn profile(nickname: &str) -> Value {
    json!({
        "fullname": format!("{nickname} of the Black Pearl"),
        "about": "sails",
        "email": format!("{nickname}@pearl.sea"),
    })
}

/// Ids of a JSON array of posts, in response order.
pub fn ids(posts: &Value) -> Vec<i64> {
    posts
        .as_array()
        .expect("array body")
        .iter()
        .map(|post| post["id"].as_i64().expect("numeric id"))
        .collect()
}

/// Register `nicknames`, create forum `pirates` owned by the first, and open
/// thread `voyage` in it. Returns the thread id.
pub async fn seed_forum(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    nicknames: &[&str],
) -> i64 {
    for nickname in nicknames {
        let uri = format!("/api/user/{nickname}/create");
        let (status, _) = send(app, post_json(&uri, &profile(nickname))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let owner = nicknames.first().expect("at least one user");
    let forum = json!({"title": "Pirates", "user": owner, "slug": "pirates"});
    let (status, _) = send(app, post_json("/api/forum/create", &forum)).await;
    assert_eq!(status, StatusCode::CREATED);

    open_thread(app, "voyage", owner).await
}

/// Open a thread with `slug` in forum `pirates`. Returns the thread id.
pub async fn open_thread(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    slug: &str,
    author: &str,
) -> i64 {
    let thread = json!({
        "title": format!("Thread {slug}"),
        "author": author,
        "message": "Where to?",
        "slug": slug,
        "created": "2024-03-01T12:00:00Z",
    });
    let (status, body) = send(app, post_json("/api/forum/pirates/create", &thread)).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().expect("thread id")
}

/// Post one reply to `thread` and return its id.
pub async fn reply(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    thread: i64,
    author: &str,
    parent: i64,
) -> i64 {
    let uri = format!("/api/thread/{thread}/create");
    let batch = json!([{"author": author, "message": "aye", "parent": parent}]);
    let (status, body) = send(app, post_json(&uri, &batch)).await;
    assert_eq!(status, StatusCode::CREATED, "reply rejected: {body}");
    ids(&body)[0]
}
