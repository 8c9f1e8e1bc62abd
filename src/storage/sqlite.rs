use std::path::Path;

use async_trait::async_trait;
use axum::body::Bytes;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{ArtifactStorage, StorageError};
use crate::models::StorageLocator;

/// Artifacts stored as BLOB rows keyed by locator.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    pub async fn open(db_path: &Path) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let storage = Self::from_pool(pool);
        storage.run_migrations().await?;
        Ok(storage)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        info!("Running artifact storage migrations");

        // Rows are written by the external publisher; this service only reads.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS artifacts (
                path TEXT PRIMARY KEY,
                content BLOB NOT NULL,
                updated_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Artifact storage migrations completed");
        Ok(())
    }
}

/// Raw database row for an artifact
#[derive(sqlx::FromRow)]
struct ArtifactRow {
    content: Vec<u8>,
    updated_at: String,
}

#[async_trait]
impl ArtifactStorage for SqliteStorage {
    async fn read_bytes(&self, locator: &StorageLocator) -> Result<Bytes, StorageError> {
        let row = sqlx::query_as::<_, ArtifactRow>(
            "SELECT content, updated_at FROM artifacts WHERE path = ?",
        )
        .bind(locator.as_str())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        debug!(
            "Read artifact {} ({} bytes, updated {})",
            locator,
            row.content.len(),
            row.updated_at
        );
        Ok(Bytes::from(row.content))
    }

    fn describe(&self) -> &'static str {
        "sqlite"
    }
}
