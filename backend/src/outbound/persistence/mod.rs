//! PostgreSQL persistence adapters using Diesel.
//!
//! Every driven forum port has a Diesel implementation here, sharing one
//! `bb8` pool from `diesel-async`. Row structs and table definitions stay
//! private to this module; repositories only translate between rows and
//! domain types.
//!
//! # Example
//!
//! ```ignore
//! use forum_backend::outbound::persistence::{DbPool, PoolConfig, store_ports};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/forum")).await?;
//! let ports = store_ports(&pool);
//! ```

use std::sync::Arc;

use crate::domain::ports::StorePorts;

pub(crate) mod diesel_helpers;
mod diesel_forum_repository;
mod diesel_post_id_sequence;
mod diesel_post_repository;
mod diesel_status_repository;
mod diesel_thread_repository;
mod diesel_user_repository;
mod diesel_vote_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_forum_repository::DieselForumRepository;
pub use diesel_post_id_sequence::DieselPostIdSequence;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_status_repository::DieselStatusRepository;
pub use diesel_thread_repository::DieselThreadRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_vote_repository::DieselVoteRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Wire every driven port to a Diesel repository over `pool`.
pub fn store_ports(pool: &DbPool) -> StorePorts {
    StorePorts {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        forums: Arc::new(DieselForumRepository::new(pool.clone())),
        threads: Arc::new(DieselThreadRepository::new(pool.clone())),
        posts: Arc::new(DieselPostRepository::new(pool.clone())),
        votes: Arc::new(DieselVoteRepository::new(pool.clone())),
        status: Arc::new(DieselStatusRepository::new(pool.clone())),
        post_ids: Arc::new(DieselPostIdSequence::new(pool.clone())),
    }
}
