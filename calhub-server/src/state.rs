use std::path::Path;
use std::sync::Arc;

use calhub_core::{CalHubResult, UserIndex, snapshot};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Shared application state
///
/// Handlers that change the index hold the write guard for the whole
/// read-decide-write sequence, so concurrent edits can't lose updates.
#[derive(Clone)]
pub struct AppState {
    index: Arc<RwLock<UserIndex>>,
}

impl AppState {
    pub fn new(index: UserIndex) -> Self {
        AppState {
            index: Arc::new(RwLock::new(index)),
        }
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, UserIndex> {
        self.index.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, UserIndex> {
        self.index.write().await
    }

    /// Save the index once any in-flight mutation has finished.
    pub async fn save_snapshot(&self, path: &Path) -> CalHubResult<()> {
        let index = self.index.write().await;
        snapshot::save(&index, path)
    }
}
