use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use axum::body::Bytes;
use tokio::sync::RwLock;

use super::{ArtifactStorage, StorageError};
use crate::models::StorageLocator;

/// In-process store used by router tests.
#[derive(Default)]
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, Bytes>>,
    offline: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put(&self, locator: &str, content: impl Into<Bytes>) {
        self.objects
            .write()
            .await
            .insert(locator.to_string(), content.into());
    }

    pub async fn remove(&self, locator: &str) {
        self.objects.write().await.remove(locator);
    }

    /// Make every subsequent read fail as if the backend were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl ArtifactStorage for MemoryStorage {
    async fn read_bytes(&self, locator: &StorageLocator) -> Result<Bytes, StorageError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(
                "memory storage is offline".to_string(),
            ));
        }
        self.objects
            .read()
            .await
            .get(locator.as_str())
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn describe(&self) -> &'static str {
        "memory"
    }
}
