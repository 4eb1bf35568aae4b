//! Server settings loaded via OrthoConfig.

use std::time::Duration;

use forum_backend::outbound::persistence::PoolConfig;
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 10;

/// Listener and store settings, read from `FORUM_*` variables and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FORUM")]
pub struct ServerSettings {
    /// PostgreSQL URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Listen address.
    pub host: Option<String>,
    /// Listen port.
    pub port: Option<u16>,
    /// Maximum pooled connections.
    pub pool_size: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Listen address in the form `HttpServer::bind` accepts.
    pub fn bind_target(&self) -> (String, u16) {
        (self.host().to_owned(), self.port())
    }

    /// Pool settings, when a database is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone())
                .with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
                .with_connection_timeout(Duration::from_secs(
                    self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
                ))
        })
    }
}
