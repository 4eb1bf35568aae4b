//! Post listing order and paging through the HTTP API.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::json;

use support::scenarios::{self, listed, shaped_thread};
use support::{forum_app, get, ids, post_json, reply, seed_forum, send};

#[rstest]
#[case("sort=flat", vec![1, 2, 3, 4, 5, 6])]
#[case("sort=flat&desc=true", vec![6, 5, 4, 3, 2, 1])]
#[case("sort=tree", vec![1, 2, 4, 3, 5, 6])]
#[case("sort=tree&desc=true", vec![5, 6, 1, 3, 2, 4])]
#[case("sort=tree&since=4&limit=2", vec![3, 5])]
#[case("sort=parent_tree&limit=1", vec![1, 2, 4, 3])]
#[case("sort=parent_tree&desc=true&limit=1", vec![5, 6])]
#[case("sort=parent_tree&since=2", vec![5, 6])]
#[case("sort=parent_tree&desc=true&since=6&limit=1", vec![1, 2, 4, 3])]
#[case("", vec![1, 2, 3, 4, 5, 6])]
#[actix_web::test]
async fn listings_follow_the_sort_mode(#[case] query: &str, #[case] expected: Vec<i64>) {
    let app = test::init_service(forum_app()).await;
    let thread = shaped_thread(&app).await;
    assert_eq!(listed(&app, thread, query).await, expected);
}

#[rstest]
#[case("flat", false)]
#[case("flat", true)]
#[case("tree", false)]
#[case("tree", true)]
#[case("parent_tree", false)]
#[case("parent_tree", true)]
#[actix_web::test]
async fn paging_visits_every_post_once(#[case] sort: &str, #[case] desc: bool) {
    let app = test::init_service(forum_app()).await;
    scenarios::paging_visits_every_post_once(&app, sort, desc).await;
}

#[rstest]
#[actix_web::test]
async fn unknown_sort_and_foreign_cursor_are_rejected() {
    let app = test::init_service(forum_app()).await;
    let thread = shaped_thread(&app).await;
    let other = support::open_thread(&app, "mutiny", "jack").await;
    let foreign = reply(&app, other, "jack", 0).await;

    let (status, _) = send(&app, get(&format!("/api/thread/{thread}/posts?sort=sideways"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get(&format!("/api/thread/{thread}/posts?limit=0"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/thread/{thread}/posts?since={foreign}");
    let (status, _) = send(&app, get(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/thread/ghost/posts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn replies_keep_their_ancestry_across_batches() {
    let app = test::init_service(forum_app()).await;
    let thread = seed_forum(&app, &["jack"]).await;
    let root = reply(&app, thread, "jack", 0).await;

    let batch = json!([
        {"author": "jack", "message": "first", "parent": root},
        {"author": "jack", "message": "second", "parent": root},
    ]);
    let (status, posts) = send(&app, post_json(&format!("/api/thread/{thread}/create"), &batch)).await;
    assert_eq!(status, StatusCode::CREATED);
    let children = ids(&posts);
    let grandchild = reply(&app, thread, "jack", children[0]).await;

    assert_eq!(
        listed(&app, thread, "sort=tree").await,
        vec![root, children[0], grandchild, children[1]]
    );
}
