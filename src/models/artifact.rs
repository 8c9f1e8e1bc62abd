use axum::body::Bytes;
use serde::Deserialize;

/// Opaque artifact payload as read from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    content: Bytes,
}

impl Artifact {
    pub fn new(content: Bytes) -> Self {
        Self { content }
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn into_bytes(self) -> Bytes {
        self.content
    }

    /// Copies the payload into an owned vector.
    pub fn into_vec(self) -> Vec<u8> {
        self.content.to_vec()
    }
}

/// Blob the external publisher writes the signed network map to.
pub const DEFAULT_LOCATOR: &str = "networkmap/network-map.ser";

/// Relative, slash-separated storage path, e.g. `networkmap/network-map.ser`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct StorageLocator(String);

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocatorError {
    #[error("storage locator is empty")]
    Empty,
    #[error("storage locator must be relative: {0}")]
    Absolute(String),
    #[error("storage locator has an invalid segment: {0}")]
    InvalidSegment(String),
}

impl StorageLocator {
    pub fn new(raw: impl Into<String>) -> Result<Self, LocatorError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(LocatorError::Empty);
        }
        if raw.starts_with('/') || raw.starts_with('\\') {
            return Err(LocatorError::Absolute(raw));
        }
        let bad_segment = raw
            .split('/')
            .any(|s| s.is_empty() || s == "." || s == ".." || s.contains('\\'));
        if bad_segment {
            return Err(LocatorError::InvalidSegment(raw));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl Default for StorageLocator {
    fn default() -> Self {
        Self(DEFAULT_LOCATOR.to_string())
    }
}

impl std::fmt::Display for StorageLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for StorageLocator {
    type Error = LocatorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
