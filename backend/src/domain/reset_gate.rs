//! Coordination between ordinary writes and the whole-store reset.
//!
//! Mutating operations hold the shared side for their whole duration; the
//! reset holds the exclusive side. A reset therefore waits for in-flight
//! writes and no write interleaves with it.

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Reader/writer gate guarding the store reset.
#[derive(Debug, Default)]
pub struct ResetGate {
    lock: RwLock<()>,
}

impl ResetGate {
    /// Create an open gate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter as an ordinary writer.
    pub async fn shared(&self) -> RwLockReadGuard<'_, ()> {
        self.lock.read().await
    }

    /// Enter as the reset, excluding every writer.
    pub async fn exclusive(&self) -> RwLockWriteGuard<'_, ()> {
        self.lock.write().await
    }
}
