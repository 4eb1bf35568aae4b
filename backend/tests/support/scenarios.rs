//! Store-agnostic behaviour checks driven through the HTTP API.
//!
//! Each scenario takes an initialised service over an empty store, so the
//! in-memory and PostgreSQL suites assert exactly the same outcomes.

use std::collections::HashSet;

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use futures::future::join_all;
use serde_json::{Value, json};

use super::{get, ids, open_thread, post_json, profile, reply, seed_forum, send};

fn vote(nickname: &str, voice: i32) -> test::TestRequest {
    post_json(
        "/api/thread/voyage/vote",
        &json!({"nickname": nickname, "voice": voice}),
    )
}

/// Thread `voyage` shaped as:
/// ```text
/// A(1)
/// ├── B(2)
/// │   └── D(4)
/// └── C(3)
/// E(5)
/// └── F(6)
/// ```
pub async fn shaped_thread(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> i64 {
    let thread = seed_forum(app, &["jack", "anne"]).await;
    let a = reply(app, thread, "jack", 0).await;
    let b = reply(app, thread, "anne", a).await;
    reply(app, thread, "jack", a).await;
    reply(app, thread, "anne", b).await;
    let e = reply(app, thread, "jack", 0).await;
    reply(app, thread, "anne", e).await;
    thread
}

/// Post ids listed for `thread` with the given query string.
pub async fn listed(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    thread: i64,
    query: &str,
) -> Vec<i64> {
    let (status, body) = send(app, get(&format!("/api/thread/{thread}/posts?{query}"))).await;
    assert_eq!(status, StatusCode::OK, "listing failed: {body}");
    ids(&body)
}

pub async fn votes_net_out_per_user(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    seed_forum(app, &["jack", "anne"]).await;

    let (_, after_up) = send(app, vote("jack", 1)).await;
    assert_eq!(after_up["votes"], 1);
    let (_, with_anne) = send(app, vote("anne", 1)).await;
    assert_eq!(with_anne["votes"], 2);
    let (status, flipped) = send(app, vote("JACK", -1)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(flipped["votes"], 0);

    let (status, _) = send(app, vote("jack", 2)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(app, vote("ghost", 1)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

pub async fn foreign_parent_batch_persists_nothing(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    let voyage = seed_forum(app, &["jack"]).await;
    let mutiny = open_thread(app, "mutiny", "jack").await;
    let foreign = reply(app, mutiny, "jack", 0).await;

    let batch = json!([
        {"author": "jack", "message": "one"},
        {"author": "jack", "message": "two"},
        {"author": "jack", "message": "three", "parent": foreign},
    ]);
    let uri = format!("/api/thread/{voyage}/create");
    let (status, error) = send(app, post_json(&uri, &batch)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["message"], "parent post belongs to another thread");

    let (_, posts) = send(app, get(&format!("/api/thread/{voyage}/posts"))).await;
    assert_eq!(posts, json!([]));
    let (_, counts) = send(app, get("/api/service/status")).await;
    assert_eq!(counts["post"], 1);
    let (_, forum) = send(app, get("/api/forum/pirates/details")).await;
    assert_eq!(forum["posts"], 1);

    let missing = json!([{"author": "jack", "message": "orphan", "parent": 999}]);
    let (status, error) = send(app, post_json(&uri, &missing)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["message"], "parent post does not exist");
}

/// Page through `voyage` three items at a time, feeding the last id back as
/// `since`, and check every post turns up exactly once.
pub async fn paging_visits_every_post_once(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    sort: &str,
    desc: bool,
) {
    let thread = seed_forum(app, &["jack"]).await;
    let mut parent = 0;
    for index in 0..10 {
        let id = reply(app, thread, "jack", parent).await;
        parent = if index % 3 == 2 { 0 } else { id };
    }

    let mut seen = Vec::new();
    let mut since: Option<i64> = None;
    loop {
        let mut query = format!("sort={sort}&desc={desc}&limit=3");
        if let Some(since) = since {
            query.push_str(&format!("&since={since}"));
        }
        let page = listed(app, thread, &query).await;
        let Some(last) = page.last().copied() else {
            break;
        };
        seen.extend(page);
        since = Some(last);
    }

    assert_eq!(seen.len(), 10, "pages: {seen:?}");
    assert_eq!(seen.iter().collect::<HashSet<_>>().len(), 10);
}

pub async fn clear_restarts_post_ids(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    let voyage = seed_forum(app, &["jack"]).await;
    let first = reply(app, voyage, "jack", 0).await;
    reply(app, voyage, "jack", first).await;

    let (_, before) = send(app, get("/api/service/status")).await;
    assert_eq!(before, json!({"user": 1, "forum": 1, "thread": 1, "post": 2}));

    let (status, body) = send(app, test::TestRequest::post().uri("/api/service/clear")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_null());

    let (_, after) = send(app, get("/api/service/status")).await;
    assert_eq!(after, json!({"user": 0, "forum": 0, "thread": 0, "post": 0}));

    let voyage = seed_forum(app, &["jack"]).await;
    assert_eq!(reply(app, voyage, "jack", 0).await, first);
}

/// Twenty sailors upvote at once, then five of them each send the same
/// downvote twice at once. Every voice counts once per sailor.
pub async fn concurrent_votes_are_all_counted(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    let sailors: Vec<String> = (0..20).map(|n| format!("sailor{n}")).collect();
    let nicknames: Vec<&str> = sailors.iter().map(String::as_str).collect();
    seed_forum(app, &nicknames).await;

    let upvotes = join_all(nicknames.iter().map(|nickname| send(app, vote(nickname, 1)))).await;
    assert!(upvotes.iter().all(|(status, _)| *status == StatusCode::OK));

    let revotes = join_all(
        nicknames
            .iter()
            .take(5)
            .flat_map(|nickname| [nickname, nickname])
            .map(|nickname| send(app, vote(nickname, -1))),
    )
    .await;
    assert!(revotes.iter().all(|(status, _)| *status == StatusCode::OK));

    let (_, thread) = send(app, get("/api/thread/voyage/details")).await;
    assert_eq!(thread["votes"], 10);
}

/// Two owners claim the same forum slug at once: one wins, the other is
/// shown the winner.
pub async fn racing_forum_creation_keeps_one_forum(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    for nickname in ["jack", "anne"] {
        let uri = format!("/api/user/{nickname}/create");
        let (status, _) = send(app, post_json(&uri, &profile(nickname))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let claims = [
        json!({"title": "Pirates", "user": "jack", "slug": "pirates"}),
        json!({"title": "Privateers", "user": "anne", "slug": "PIRATES"}),
    ];
    let mut outcomes: Vec<(StatusCode, Value)> = join_all(
        claims
            .iter()
            .map(|claim| send(app, post_json("/api/forum/create", claim))),
    )
    .await;
    outcomes.sort_by_key(|(status, _)| status.as_u16());

    let statuses: Vec<StatusCode> = outcomes.iter().map(|(status, _)| *status).collect();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(outcomes[0].1, outcomes[1].1);

    let (_, counts) = send(app, get("/api/service/status")).await;
    assert_eq!(counts["forum"], 1);
}

/// Root posts created by concurrent batches list in the same order whether
/// sorted by `(created, id)` or by tree path.
pub async fn concurrent_batches_keep_orders_aligned(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) {
    let thread = seed_forum(app, &["jack"]).await;
    let uri = format!("/api/thread/{thread}/create");
    let batch = json!([
        {"author": "jack", "message": "port"},
        {"author": "jack", "message": "starboard"},
    ]);

    let created = join_all((0..10).map(|_| send(app, post_json(&uri, &batch)))).await;
    assert!(created.iter().all(|(status, _)| *status == StatusCode::CREATED));

    let flat = listed(app, thread, "sort=flat").await;
    assert_eq!(flat.len(), 20);
    assert_eq!(listed(app, thread, "sort=tree").await, flat);
    assert_eq!(listed(app, thread, "sort=parent_tree").await, flat);
}
