use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use axum::body::Bytes;
use tracing::debug;

use super::{ArtifactStorage, StorageError};
use crate::models::StorageLocator;

/// Artifacts stored as plain files below a root directory.
pub struct FilesystemStorage {
    root: PathBuf,
}

impl FilesystemStorage {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Fails if the root is missing or not a directory.
    pub async fn check_root(&self) -> Result<(), StorageError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StorageError::Misconfigured(format!(
                "storage root {} is not a directory",
                self.root.display()
            ))),
            Err(e) => Err(StorageError::Misconfigured(format!(
                "storage root {} is not accessible: {}",
                self.root.display(),
                e
            ))),
        }
    }

    fn resolve(&self, locator: &StorageLocator) -> PathBuf {
        locator
            .segments()
            .fold(self.root.clone(), |path, segment| path.join(segment))
    }
}

#[async_trait]
impl ArtifactStorage for FilesystemStorage {
    async fn read_bytes(&self, locator: &StorageLocator) -> Result<Bytes, StorageError> {
        let path = self.resolve(locator);
        debug!("Reading artifact file {}", path.display());

        match tokio::fs::read(&path).await {
            Ok(content) => Ok(Bytes::from(content)),
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::IsADirectory
                ) =>
            {
                Err(StorageError::NotFound)
            }
            Err(e) => {
                // Some platforms report a directory read with an uncategorized kind
                if tokio::fs::metadata(&path)
                    .await
                    .map(|m| m.is_dir())
                    .unwrap_or(false)
                {
                    return Err(StorageError::NotFound);
                }
                Err(StorageError::Unavailable(e.to_string()))
            }
        }
    }

    fn describe(&self) -> &'static str {
        "filesystem"
    }
}
