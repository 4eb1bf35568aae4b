//! bb8 pool of async Diesel PostgreSQL connections.
//!
//! The pool is built once at startup from [`PoolConfig`] and cloned into each
//! repository. Checkout failures surface as [`PoolError::Checkout`], which the
//! repositories report as store connection errors.

use std::time::Duration;

use diesel_async::AsyncPgConnection;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};

use crate::domain::ports::StoreError;

/// Errors raised while building the pool or checking out a connection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// No connection became available within the checkout timeout.
    #[error("failed to get connection from pool: {message}")]
    Checkout { message: String },

    /// The pool could not be constructed.
    #[error("failed to build connection pool: {message}")]
    Build { message: String },
}

impl PoolError {
    /// Create a checkout error.
    pub fn checkout(message: impl Into<String>) -> Self {
        Self::Checkout {
            message: message.into(),
        }
    }

    /// Create a build error.
    pub fn build(message: impl Into<String>) -> Self {
        Self::Build {
            message: message.into(),
        }
    }
}

impl From<PoolError> for StoreError {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::connection(message)
            }
        }
    }
}

/// Connection pool settings.
///
/// # Example
///
/// ```ignore
/// let config = PoolConfig::new("postgres://forum@localhost/forum")
///     .with_max_size(16)
///     .with_connection_timeout(Duration::from_secs(5));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    database_url: String,
    max_size: u32,
    min_idle: Option<u32>,
    connection_timeout: Duration,
}

impl PoolConfig {
    /// Configuration with eight connections, no idle floor, and a ten second
    /// checkout timeout.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_size: 8,
            min_idle: None,
            connection_timeout: Duration::from_secs(10),
        }
    }

    /// Set the maximum number of pooled connections.
    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_size = max_size;
        self
    }

    /// Keep at least this many idle connections open.
    pub fn with_min_idle(mut self, min_idle: Option<u32>) -> Self {
        self.min_idle = min_idle;
        self
    }

    /// Set how long a checkout may wait.
    pub fn with_connection_timeout(mut self, timeout: Duration) -> Self {
        self.connection_timeout = timeout;
        self
    }

    /// Database URL the pool connects to.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }
}

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct DbPool {
    inner: Pool<AsyncPgConnection>,
}

impl DbPool {
    /// Build the pool.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Build`] when bb8 rejects the configuration.
    pub async fn new(config: PoolConfig) -> Result<Self, PoolError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_size)
            .min_idle(config.min_idle)
            .connection_timeout(config.connection_timeout)
            .build(manager)
            .await
            .map_err(|err| PoolError::build(err.to_string()))?;

        Ok(Self { inner: pool })
    }

    /// Check out a connection.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Checkout`] when the checkout times out or the
    /// connection cannot be established.
    pub async fn get(&self) -> Result<PooledConnection<'_, AsyncPgConnection>, PoolError> {
        self.inner
            .get()
            .await
            .map_err(|err| PoolError::checkout(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_forum_sizing() {
        let config = PoolConfig::new("postgres://localhost/forum");

        assert_eq!(config.database_url(), "postgres://localhost/forum");
        assert_eq!(config.max_size, 8);
        assert_eq!(config.min_idle, None);
        assert_eq!(config.connection_timeout, Duration::from_secs(10));
    }

    #[rstest]
    fn builders_override_defaults() {
        let config = PoolConfig::new("postgres://localhost/forum")
            .with_max_size(20)
            .with_min_idle(Some(2))
            .with_connection_timeout(Duration::from_secs(3));

        assert_eq!(config.max_size, 20);
        assert_eq!(config.min_idle, Some(2));
        assert_eq!(config.connection_timeout, Duration::from_secs(3));
    }

    #[rstest]
    #[case(PoolError::checkout("refused"))]
    #[case(PoolError::build("bad url"))]
    fn pool_errors_become_connection_errors(#[case] error: PoolError) {
        assert!(matches!(
            StoreError::from(error),
            StoreError::Connection { .. }
        ));
    }
}
