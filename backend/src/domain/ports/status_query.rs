//! Driving port for store counters.

use async_trait::async_trait;

use crate::domain::{Error, Status};

/// Whole-store counters.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    /// Count stored users, forums, threads, and posts.
    async fn status(&self) -> Result<Status, Error>;
}
