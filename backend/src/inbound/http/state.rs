//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be exercised over any store.

use std::sync::Arc;

use crate::domain::ForumServices;
use crate::domain::ports::{
    ForumCommand, ForumQuery, MaintenanceCommand, PostCommand, PostQuery, StatusQuery,
    ThreadCommand, ThreadQuery, UserCommand, UserQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
    pub forums: Arc<dyn ForumCommand>,
    pub forums_query: Arc<dyn ForumQuery>,
    pub threads: Arc<dyn ThreadCommand>,
    pub threads_query: Arc<dyn ThreadQuery>,
    pub posts: Arc<dyn PostCommand>,
    pub posts_query: Arc<dyn PostQuery>,
    pub maintenance: Arc<dyn MaintenanceCommand>,
    pub status: Arc<dyn StatusQuery>,
}

impl From<ForumServices> for HttpState {
    fn from(services: ForumServices) -> Self {
        Self {
            users: services.users.clone(),
            users_query: services.users,
            forums: services.forums.clone(),
            forums_query: services.forums,
            threads: services.threads.clone(),
            threads_query: services.threads,
            posts: services.posts.clone(),
            posts_query: services.posts,
            maintenance: services.maintenance.clone(),
            status: services.maintenance,
        }
    }
}
