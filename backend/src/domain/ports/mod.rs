//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PostIdSequence`]) are implemented by the
//! outbound adapters. Driving ports (`*Command`, `*Query`) are implemented by
//! the domain services and consumed by the inbound HTTP adapter.

use std::sync::Arc;

mod macros;
pub(crate) use macros::define_port_error;

mod forum_command;
mod forum_query;
mod forum_repository;
mod maintenance_command;
mod post_command;
mod post_id_sequence;
mod post_query;
mod post_repository;
mod status_query;
mod status_repository;
mod store_error;
mod thread_command;
mod thread_query;
mod thread_repository;
mod user_command;
mod user_query;
mod user_repository;
mod vote_repository;

pub use forum_command::ForumCommand;
pub use forum_query::ForumQuery;
#[cfg(test)]
pub use forum_repository::MockForumRepository;
pub use forum_repository::ForumRepository;
pub use maintenance_command::MaintenanceCommand;
pub use post_command::PostCommand;
#[cfg(test)]
pub use post_id_sequence::MockPostIdSequence;
pub use post_id_sequence::PostIdSequence;
pub use post_query::PostQuery;
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::PostRepository;
pub use status_query::StatusQuery;
#[cfg(test)]
pub use status_repository::MockStatusRepository;
pub use status_repository::StatusRepository;
pub(crate) use store_error::map_store_error;
pub use store_error::StoreError;
pub use thread_command::ThreadCommand;
pub use thread_query::ThreadQuery;
#[cfg(test)]
pub use thread_repository::MockThreadRepository;
pub use thread_repository::ThreadRepository;
pub use user_command::{UserCommand, UserCreation};
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::UserRepository;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::VoteRepository;

/// Driven ports backing the forum services.
///
/// Both storage adapters hand out a fully populated bundle so the services
/// never know which one they run against.
#[derive(Clone)]
pub struct StorePorts {
    /// User profiles.
    pub users: Arc<dyn UserRepository>,
    /// Forums and forum listings.
    pub forums: Arc<dyn ForumRepository>,
    /// Threads.
    pub threads: Arc<dyn ThreadRepository>,
    /// Posts and post listings.
    pub posts: Arc<dyn PostRepository>,
    /// Thread votes.
    pub votes: Arc<dyn VoteRepository>,
    /// Counters and reset.
    pub status: Arc<dyn StatusRepository>,
    /// Post id allocation.
    pub post_ids: Arc<dyn PostIdSequence>,
}
