//! Tests for the post service.

use super::*;
use crate::domain::ports::{
    MockForumRepository, MockPostIdSequence, MockPostRepository, MockThreadRepository,
    MockUserRepository, ThreadRepository,
};
use crate::domain::{ErrorCode, Forum, PostPath, Thread, ThreadId, User};
use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 7, 4, 18, 0, 0)
        .single()
        .expect("valid time")
}

fn treasure() -> Thread {
    Thread {
        id: ThreadId::new(3),
        title: "Treasure".to_owned(),
        author: "jack".to_owned(),
        forum: "Pirates".to_owned(),
        message: "X marks the spot".to_owned(),
        votes: 0,
        slug: None,
        created: fixture_now(),
    }
}

fn user(nickname: &str) -> User {
    User {
        nickname: nickname.to_owned(),
        fullname: nickname.to_uppercase(),
        about: String::new(),
        email: format!("{nickname}@pearl.sea"),
    }
}

fn stored_post(id: i64, thread: i64) -> Post {
    Post {
        id: PostId::new(id),
        parent: None,
        author: "jack".to_owned(),
        message: "Ahoy".to_owned(),
        is_edited: false,
        forum: "Pirates".to_owned(),
        thread: ThreadId::new(thread),
        created: fixture_now(),
        path: PostPath::root(PostId::new(id)),
    }
}

fn draft(author: &str, parent: Option<i64>) -> PostDraft {
    PostDraft {
        author: author.to_owned(),
        message: format!("from {author}"),
        parent: parent.map(PostId::new),
    }
}

struct Mocks {
    users: MockUserRepository,
    forums: MockForumRepository,
    threads: MockThreadRepository,
    posts: MockPostRepository,
    post_ids: MockPostIdSequence,
}

#[fixture]
fn mocks() -> Mocks {
    let mut threads = MockThreadRepository::new();
    threads.expect_find().returning(|_| Ok(Some(treasure())));
    Mocks {
        users: MockUserRepository::new(),
        forums: MockForumRepository::new(),
        threads,
        posts: MockPostRepository::new(),
        post_ids: MockPostIdSequence::new(),
    }
}

fn service(mocks: Mocks) -> PostService {
    let threads: Arc<dyn ThreadRepository> = Arc::new(mocks.threads);
    let posts: Arc<dyn PostRepository> = Arc::new(mocks.posts);
    let resolver = IdentityResolver::new(
        Arc::new(mocks.users),
        Arc::new(mocks.forums),
        threads,
    );
    PostService::new(
        posts,
        Arc::new(mocks.post_ids),
        resolver,
        Arc::new(ResetGate::new()),
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        }),
    )
}

#[rstest]
#[tokio::test]
async fn create_posts_assembles_batch(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_nickname()
        .times(2)
        .returning(|nickname| Ok(Some(user(&nickname.to_lowercase()))));
    mocks
        .posts
        .expect_find_by_id()
        .withf(|id| *id == PostId::new(5))
        .times(1)
        .returning(|_| Ok(Some(stored_post(5, 3))));
    mocks
        .post_ids
        .expect_next_ids()
        .withf(|count| *count == 3)
        .times(1)
        .return_once(|_| Ok(vec![PostId::new(10), PostId::new(11), PostId::new(12)]));
    mocks
        .posts
        .expect_insert_batch()
        .withf(|posts| {
            posts.len() == 3
                && posts.iter().all(|post| post.created == fixture_now())
                && posts.iter().all(|post| post.forum == "Pirates")
        })
        .times(1)
        .return_once(|_| Ok(()));

    let posts = service(mocks)
        .create_posts(
            &ThreadLocator::parse("3"),
            vec![draft("JACK", None), draft("Will", Some(5)), draft("jack", Some(5))],
        )
        .await
        .expect("batch stored");

    let authors: Vec<&str> = posts.iter().map(|post| post.author.as_str()).collect();
    assert_eq!(authors, vec!["jack", "will", "jack"]);
    assert_eq!(posts[0].path.segments(), &[10]);
    assert_eq!(posts[1].path.segments(), &[5, 11]);
    assert_eq!(posts[2].parent, Some(PostId::new(5)));
}

#[rstest]
#[tokio::test]
async fn create_posts_accepts_empty_batch(mut mocks: Mocks) {
    mocks.post_ids.expect_next_ids().never();
    mocks.posts.expect_insert_batch().never();

    let posts = service(mocks)
        .create_posts(&ThreadLocator::parse("3"), Vec::new())
        .await
        .expect("empty batch");

    assert!(posts.is_empty());
}

#[rstest]
#[tokio::test]
async fn create_posts_requires_thread_even_for_empty_batch() {
    let mut threads = MockThreadRepository::new();
    threads.expect_find().return_once(|_| Ok(None));
    let mocks = Mocks {
        users: MockUserRepository::new(),
        forums: MockForumRepository::new(),
        threads,
        posts: MockPostRepository::new(),
        post_ids: MockPostIdSequence::new(),
    };

    let err = service(mocks)
        .create_posts(&ThreadLocator::parse("ghost-thread"), Vec::new())
        .await
        .expect_err("thread missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_posts_aborts_on_unknown_author(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_nickname()
        .returning(|nickname| Ok((nickname == "jack").then(|| user("jack"))));
    mocks.post_ids.expect_next_ids().never();
    mocks.posts.expect_insert_batch().never();

    let err = service(mocks)
        .create_posts(
            &ThreadLocator::parse("3"),
            vec![draft("jack", None), draft("ghost", None)],
        )
        .await
        .expect_err("author missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(None, "parent post does not exist")]
#[case(Some(stored_post(5, 99)), "parent post belongs to another thread")]
#[tokio::test]
async fn create_posts_rejects_bad_parent(
    mut mocks: Mocks,
    #[case] parent: Option<Post>,
    #[case] message: &str,
) {
    mocks
        .users
        .expect_find_by_nickname()
        .returning(|_| Ok(Some(user("jack"))));
    mocks
        .posts
        .expect_find_by_id()
        .return_once(move |_| Ok(parent));
    mocks.post_ids.expect_next_ids().never();
    mocks.posts.expect_insert_batch().never();

    let err = service(mocks)
        .create_posts(&ThreadLocator::parse("3"), vec![draft("jack", Some(5))])
        .await
        .expect_err("bad parent");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.message(), message);
}

#[rstest]
#[tokio::test]
async fn post_details_attaches_requested_entities(mut mocks: Mocks) {
    mocks
        .posts
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_post(5, 3))));
    mocks
        .users
        .expect_find_by_nickname()
        .times(1)
        .return_once(|_| Ok(Some(user("jack"))));
    mocks.forums.expect_find_by_slug().times(1).return_once(|_| {
        Ok(Some(Forum {
            title: "Pirates".to_owned(),
            user: "jack".to_owned(),
            slug: "Pirates".to_owned(),
            posts: 1,
            threads: 1,
        }))
    });

    let details = service(mocks)
        .post_details(
            PostId::new(5),
            Related {
                user: true,
                forum: true,
                thread: false,
            },
        )
        .await
        .expect("details resolved");

    assert_eq!(details.author.map(|user| user.nickname).as_deref(), Some("jack"));
    assert_eq!(details.forum.map(|forum| forum.posts), Some(1));
    assert!(details.thread.is_none());
}

#[rstest]
#[tokio::test]
async fn post_details_requires_post(mut mocks: Mocks) {
    mocks.posts.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(mocks)
        .post_details(PostId::new(404), Related::default())
        .await
        .expect_err("post missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "post 404 not found");
}

#[rstest]
#[tokio::test]
async fn update_post_with_same_message_skips_store(mut mocks: Mocks) {
    mocks
        .posts
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_post(5, 3))));
    mocks.posts.expect_update_message().never();

    let post = service(mocks)
        .update_post(
            PostId::new(5),
            PostPatch {
                message: Some("Ahoy".to_owned()),
            },
        )
        .await
        .expect("no-op edit");

    assert!(!post.is_edited);
}

#[rstest]
#[tokio::test]
async fn update_post_marks_edited(mut mocks: Mocks) {
    mocks
        .posts
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_post(5, 3))));
    mocks
        .posts
        .expect_update_message()
        .withf(|id, message| *id == PostId::new(5) && message == "Avast")
        .times(1)
        .returning(|_, message| {
            Ok(Some(Post {
                message: message.to_owned(),
                is_edited: true,
                ..stored_post(5, 3)
            }))
        });

    let post = service(mocks)
        .update_post(
            PostId::new(5),
            PostPatch {
                message: Some("Avast".to_owned()),
            },
        )
        .await
        .expect("edit stored");

    assert!(post.is_edited);
    assert_eq!(post.message, "Avast");
}
