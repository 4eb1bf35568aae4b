//! Driving port for the store reset.

use async_trait::async_trait;

use crate::domain::Error;

/// Whole-store maintenance.
#[async_trait]
pub trait MaintenanceCommand: Send + Sync {
    /// Delete everything and restart id assignment.
    async fn clear(&self) -> Result<(), Error>;
}
