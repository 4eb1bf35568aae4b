//! Tests for the forum service.

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ThreadId;
use crate::domain::ports::{
    MockForumRepository, MockThreadRepository, MockUserRepository, UserRepository,
};
use chrono::{Local, TimeZone};
use pagination::{Direction, Limit};
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
    Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0)
        .single()
        .expect("valid time")
}

fn jack() -> User {
    User {
        nickname: "jack".to_owned(),
        fullname: "Jack Sparrow".to_owned(),
        about: String::new(),
        email: "jack@pearl.sea".to_owned(),
    }
}

fn pirates() -> Forum {
    Forum {
        title: "Pirates".to_owned(),
        user: "jack".to_owned(),
        slug: "Pirates".to_owned(),
        posts: 0,
        threads: 0,
    }
}

fn stored_thread(new_thread: &NewThread) -> Thread {
    Thread {
        id: ThreadId::new(1),
        title: new_thread.title.clone(),
        author: new_thread.author.clone(),
        forum: new_thread.forum.clone(),
        message: new_thread.message.clone(),
        votes: 0,
        slug: new_thread.slug.clone(),
        created: new_thread.created,
    }
}

#[fixture]
fn users() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_nickname()
        .returning(|_| Ok(Some(jack())));
    users
}

fn service(
    users: MockUserRepository,
    forums: MockForumRepository,
    threads: MockThreadRepository,
) -> ForumService {
    let users: Arc<dyn UserRepository> = Arc::new(users);
    let forums: Arc<dyn ForumRepository> = Arc::new(forums);
    let threads: Arc<dyn ThreadRepository> = Arc::new(threads);
    let resolver = IdentityResolver::new(users, Arc::clone(&forums), Arc::clone(&threads));
    ForumService::new(
        forums,
        threads,
        resolver,
        Arc::new(ResetGate::new()),
        Arc::new(FixtureClock {
            utc_now: fixture_now(),
        }),
    )
}

fn draft(slug: Option<&str>) -> ThreadDraft {
    ThreadDraft {
        title: "Treasure".to_owned(),
        author: "JACK".to_owned(),
        message: "X marks the spot".to_owned(),
        slug: slug.map(str::to_owned),
        created: None,
    }
}

#[rstest]
#[tokio::test]
async fn create_forum_uses_canonical_owner(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums.expect_find_by_slug().times(1).return_once(|_| Ok(None));
    forums
        .expect_insert()
        .withf(|forum| forum.user == "jack" && forum.slug == "pirates")
        .times(1)
        .return_once(|_| Ok(()));

    let outcome = service(users, forums, MockThreadRepository::new())
        .create_forum(ForumDraft {
            title: "Pirates".to_owned(),
            slug: "pirates".to_owned(),
            user: "JACK".to_owned(),
        })
        .await
        .expect("forum created");

    assert!(outcome.is_created());
}

#[rstest]
#[tokio::test]
async fn create_forum_returns_existing_forum(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums
        .expect_find_by_slug()
        .times(1)
        .return_once(|_| Ok(Some(pirates())));
    forums.expect_insert().never();

    let outcome = service(users, forums, MockThreadRepository::new())
        .create_forum(ForumDraft {
            title: "Other".to_owned(),
            slug: "PIRATES".to_owned(),
            user: "jack".to_owned(),
        })
        .await
        .expect("conflict reported");

    assert_eq!(outcome, CreateOutcome::Existing(pirates()));
}

#[rstest]
#[tokio::test]
async fn create_forum_requires_owner() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_nickname().return_once(|_| Ok(None));
    let mut forums = MockForumRepository::new();
    forums.expect_insert().never();

    let err = service(users, forums, MockThreadRepository::new())
        .create_forum(ForumDraft {
            title: "Pirates".to_owned(),
            slug: "pirates".to_owned(),
            user: "ghost".to_owned(),
        })
        .await
        .expect_err("owner missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn create_thread_defaults_creation_time(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums
        .expect_find_by_slug()
        .return_once(|_| Ok(Some(pirates())));
    let mut threads = MockThreadRepository::new();
    threads.expect_find().never();
    threads
        .expect_insert()
        .withf(|thread| {
            thread.created == fixture_now()
                && thread.forum == "Pirates"
                && thread.author == "jack"
                && thread.slug.is_none()
        })
        .times(1)
        .returning(|thread| Ok(stored_thread(thread)));

    let outcome = service(users, forums, threads)
        .create_thread("pirates", draft(Some("")))
        .await
        .expect("thread created");

    let CreateOutcome::Created(thread) = outcome else {
        panic!("expected a new thread");
    };
    assert_eq!(thread.created, fixture_now());
}

#[rstest]
#[tokio::test]
async fn create_thread_returns_thread_holding_slug(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums
        .expect_find_by_slug()
        .return_once(|_| Ok(Some(pirates())));
    let existing = Thread {
        id: ThreadId::new(9),
        title: "Older".to_owned(),
        author: "jack".to_owned(),
        forum: "Pirates".to_owned(),
        message: "first".to_owned(),
        votes: 3,
        slug: Some("treasure".to_owned()),
        created: fixture_now(),
    };
    let returned = existing.clone();
    let mut threads = MockThreadRepository::new();
    threads
        .expect_find()
        .withf(|locator| *locator == ThreadLocator::Slug("Treasure".to_owned()))
        .times(1)
        .return_once(move |_| Ok(Some(returned)));
    threads.expect_insert().never();

    let outcome = service(users, forums, threads)
        .create_thread("pirates", draft(Some("Treasure")))
        .await
        .expect("conflict reported");

    assert_eq!(outcome, CreateOutcome::Existing(existing));
}

#[rstest]
#[tokio::test]
async fn create_thread_looks_up_numeric_slug_as_slug(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums
        .expect_find_by_slug()
        .return_once(|_| Ok(Some(pirates())));
    let mut threads = MockThreadRepository::new();
    threads
        .expect_find()
        .withf(|locator| *locator == ThreadLocator::Slug("123".to_owned()))
        .times(1)
        .return_once(|_| Ok(None));
    threads
        .expect_insert()
        .withf(|thread| thread.slug.as_deref() == Some("123"))
        .times(1)
        .returning(|thread| Ok(stored_thread(thread)));

    let outcome = service(users, forums, threads)
        .create_thread("pirates", draft(Some("123")))
        .await
        .expect("numeric slug accepted");

    assert!(outcome.is_created());
}

#[rstest]
#[tokio::test]
async fn create_forum_rereads_winner_after_duplicate(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    let mut lookups = 0;
    forums.expect_find_by_slug().times(2).returning(move |_| {
        lookups += 1;
        Ok((lookups > 1).then(pirates))
    });
    forums.expect_insert().times(1).return_once(|_| {
        Err(StoreError::duplicate("forums_slug_key"))
    });

    let outcome = service(users, forums, MockThreadRepository::new())
        .create_forum(ForumDraft {
            title: "Late".to_owned(),
            slug: "pirates".to_owned(),
            user: "jack".to_owned(),
        })
        .await
        .expect("race reported as conflict");

    assert_eq!(outcome, CreateOutcome::Existing(pirates()));
}

#[rstest]
#[tokio::test]
async fn list_threads_uses_canonical_forum_slug(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums
        .expect_find_by_slug()
        .return_once(|_| Ok(Some(pirates())));
    forums
        .expect_list_threads()
        .withf(|forum, page| forum == "Pirates" && page.direction() == Direction::Descending)
        .times(1)
        .return_once(|_, _| Ok(Vec::new()));

    let page = PageRequest::new(Direction::Descending).with_limit(Limit::new(5).expect("limit"));
    let threads = service(users, forums, MockThreadRepository::new())
        .list_threads("pirates", page)
        .await
        .expect("listing succeeds");

    assert!(threads.is_empty());
}

#[rstest]
#[tokio::test]
async fn list_users_requires_forum(users: MockUserRepository) {
    let mut forums = MockForumRepository::new();
    forums.expect_find_by_slug().return_once(|_| Ok(None));
    forums.expect_list_users().never();

    let err = service(users, forums, MockThreadRepository::new())
        .list_users("ghost-ship", PageRequest::default())
        .await
        .expect_err("forum missing");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
