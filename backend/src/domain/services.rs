//! Assembly of the domain services over a set of store ports.

use std::sync::Arc;

use mockable::Clock;

use super::ports::StorePorts;
use super::{
    ForumService, IdentityResolver, MaintenanceService, PostService, ResetGate, ThreadService,
    UserService,
};

/// Every domain service, sharing one reset gate and one identity resolver.
#[derive(Clone)]
pub struct ForumServices {
    /// User registration and profiles.
    pub users: Arc<UserService>,
    /// Forums, thread creation, and forum listings.
    pub forums: Arc<ForumService>,
    /// Thread lookups, edits, votes, and post listings.
    pub threads: Arc<ThreadService>,
    /// Post creation, details, and edits.
    pub posts: Arc<PostService>,
    /// Status and reset.
    pub maintenance: Arc<MaintenanceService>,
}

impl ForumServices {
    /// Wire the services over `ports`.
    pub fn new(ports: StorePorts, clock: Arc<dyn Clock>) -> Self {
        let gate = Arc::new(ResetGate::new());
        let resolver = IdentityResolver::new(
            Arc::clone(&ports.users),
            Arc::clone(&ports.forums),
            Arc::clone(&ports.threads),
        );

        Self {
            users: Arc::new(UserService::new(
                ports.users,
                resolver.clone(),
                Arc::clone(&gate),
            )),
            forums: Arc::new(ForumService::new(
                ports.forums,
                Arc::clone(&ports.threads),
                resolver.clone(),
                Arc::clone(&gate),
                Arc::clone(&clock),
            )),
            threads: Arc::new(ThreadService::new(
                ports.threads,
                Arc::clone(&ports.posts),
                ports.votes,
                resolver.clone(),
                Arc::clone(&gate),
            )),
            posts: Arc::new(PostService::new(
                ports.posts,
                Arc::clone(&ports.post_ids),
                resolver,
                Arc::clone(&gate),
                clock,
            )),
            maintenance: Arc::new(MaintenanceService::new(ports.status, ports.post_ids, gate)),
        }
    }
}
