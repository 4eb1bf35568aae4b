//! Store selection and HTTP state assembly.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use forum_backend::domain::ForumServices;
use forum_backend::domain::ports::StorePorts;
use forum_backend::inbound::http::state::HttpState;
use forum_backend::outbound::memory::MemoryStore;
use forum_backend::outbound::persistence::{
    DbPool, MigrationError, PoolError, run_pending_migrations, store_ports,
};

use super::ServerSettings;

/// Failures while preparing the backing store.
#[derive(Debug, Error)]
pub enum StoreSetupError {
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("migration task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Build the store ports: PostgreSQL when a URL is configured, otherwise
/// a fresh in-memory store.
///
/// Pending migrations are applied on a blocking thread before the pool is
/// opened.
pub async fn build_store(settings: &ServerSettings) -> Result<StorePorts, StoreSetupError> {
    let Some(pool_config) = settings.pool_config() else {
        info!("no database configured; using the in-memory store");
        return Ok(MemoryStore::new().into_ports());
    };

    let url = pool_config.database_url().to_owned();
    tokio::task::spawn_blocking(move || run_pending_migrations(&url)).await??;

    let pool = DbPool::new(pool_config).await?;
    Ok(store_ports(&pool))
}

/// Wire the domain services over `ports` for the HTTP handlers.
pub fn build_http_state(ports: StorePorts) -> web::Data<HttpState> {
    let services = ForumServices::new(ports, Arc::new(DefaultClock));
    web::Data::new(HttpState::from(services))
}
