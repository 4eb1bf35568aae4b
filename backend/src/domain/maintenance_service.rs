//! Whole-store status and reset.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    MaintenanceCommand, PostIdSequence, StatusQuery, StatusRepository, map_store_error,
};
use super::{Error, ResetGate, Status};

/// Service implementing the maintenance driving ports.
#[derive(Clone)]
pub struct MaintenanceService {
    status: Arc<dyn StatusRepository>,
    post_ids: Arc<dyn PostIdSequence>,
    gate: Arc<ResetGate>,
}

impl MaintenanceService {
    /// Create the service.
    pub fn new(
        status: Arc<dyn StatusRepository>,
        post_ids: Arc<dyn PostIdSequence>,
        gate: Arc<ResetGate>,
    ) -> Self {
        Self {
            status,
            post_ids,
            gate,
        }
    }
}

#[async_trait]
impl StatusQuery for MaintenanceService {
    async fn status(&self) -> Result<Status, Error> {
        self.status.counts().await.map_err(map_store_error)
    }
}

#[async_trait]
impl MaintenanceCommand for MaintenanceService {
    async fn clear(&self) -> Result<(), Error> {
        let _reset = self.gate.exclusive().await;
        self.status.clear().await.map_err(map_store_error)?;
        self.post_ids.reset().await.map_err(map_store_error)?;
        info!("forum store cleared");
        Ok(())
    }
}
