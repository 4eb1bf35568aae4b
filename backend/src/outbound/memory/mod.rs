//! In-process forum store.
//!
//! Serves every driven port from a single mutex-guarded state, so each port
//! call is atomic with respect to the others. Used when no database URL is
//! configured and by the HTTP integration tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::{StoreError, StorePorts};
use crate::domain::{Forum, Post, PostId, Thread, ThreadId, User, Voice, fold_case};

mod forums;
mod posts;
mod sequence;
mod status;
mod threads;
mod users;
mod votes;

pub use sequence::MemoryPostIdSequence;

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    forums: Vec<Forum>,
    threads: Vec<Thread>,
    last_thread_id: i64,
    posts: BTreeMap<PostId, Post>,
    /// Keyed by thread and folded nickname.
    votes: HashMap<(ThreadId, String), Voice>,
    /// `(forum slug, folded nickname)` pairs.
    participants: BTreeSet<(String, String)>,
}

impl State {
    fn user(&self, nickname: &str) -> Option<&User> {
        let folded = fold_case(nickname);
        self.users
            .iter()
            .find(|user| fold_case(&user.nickname) == folded)
    }

    fn forum_mut(&mut self, slug: &str) -> Result<&mut Forum, StoreError> {
        self.forums
            .iter_mut()
            .find(|forum| forum.slug == slug)
            .ok_or_else(|| StoreError::query(format!("forum {slug} is not stored")))
    }

    fn thread_mut(&mut self, id: ThreadId) -> Option<&mut Thread> {
        self.threads.iter_mut().find(|thread| thread.id == id)
    }

    fn join(&mut self, forum: &str, nickname: &str) {
        self.participants
            .insert((forum.to_owned(), fold_case(nickname)));
    }
}

/// Mutex-guarded forum store implementing every repository port.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Share the store behind every driven port, paired with a fresh
    /// in-process post id sequence.
    pub fn into_ports(self) -> StorePorts {
        let store = Arc::new(self);
        StorePorts {
            users: store.clone(),
            forums: store.clone(),
            threads: store.clone(),
            posts: store.clone(),
            votes: store.clone(),
            status: store,
            post_ids: Arc::new(MemoryPostIdSequence::new()),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, StoreError> {
        self.state
            .lock()
            .map_err(|_| StoreError::query("memory store lock poisoned"))
    }
}
