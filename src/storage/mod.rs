//! Read-only storage backends the artifact routes pull bytes from.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Bytes;

use crate::config::StorageConfig;
use crate::models::StorageLocator;

mod fs;
#[cfg(test)]
mod memory;
mod sqlite;

pub use fs::FilesystemStorage;
#[cfg(test)]
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Artifact not found")]
    NotFound,
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => StorageError::NotFound,
            other => StorageError::Unavailable(other.to_string()),
        }
    }
}

/// Key-addressed binary object store.
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    /// Read the full current content stored at `locator`.
    async fn read_bytes(&self, locator: &StorageLocator) -> Result<Bytes, StorageError>;

    /// Backend kind, for logs and the health endpoint.
    fn describe(&self) -> &'static str;
}

pub type SharedStorage = Arc<dyn ArtifactStorage>;

/// Open the backend selected by configuration.
pub async fn open(config: &StorageConfig) -> Result<SharedStorage, StorageError> {
    match config {
        StorageConfig::Filesystem { root } => {
            let storage = FilesystemStorage::new(root.clone());
            storage.check_root().await?;
            Ok(Arc::new(storage))
        }
        StorageConfig::Sqlite { path } => {
            let storage = SqliteStorage::open(path).await?;
            Ok(Arc::new(storage))
        }
    }
}
