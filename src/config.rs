use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::{BodyRepr, RouteBinding, StorageLocator};

pub const ENV_ADDR: &str = "ARTIFACT_SERVER_ADDR";
pub const ENV_STORAGE: &str = "ARTIFACT_STORAGE";
pub const ENV_ROUTES_FILE: &str = "ARTIFACT_ROUTES_FILE";

/// Paths served by the service itself; route tables may not bind them.
pub const RESERVED_PATHS: &[&str] = &["/health", "/ping"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid listen address {0}: {1}")]
    InvalidAddr(String, std::net::AddrParseError),
    #[error("Invalid storage spec {0}: expected fs:<dir> or sqlite:<file>")]
    InvalidStorage(String),
    #[error("Failed to read route file {0}: {1}")]
    RoutesFile(PathBuf, std::io::Error),
    #[error("Failed to parse route file: {0}")]
    RoutesParse(#[from] serde_json::Error),
    #[error("Route table is empty")]
    NoRoutes,
    #[error("Route path must start with '/': {0}")]
    InvalidPath(String),
    #[error("Route path is reserved: {0}")]
    ReservedPath(String),
    #[error("Route path bound twice: {0}")]
    DuplicatePath(String),
}

/// Where artifact bytes are read from
#[derive(Debug, Clone, PartialEq)]
pub enum StorageConfig {
    Filesystem { root: PathBuf },
    Sqlite { path: PathBuf },
}

impl std::str::FromStr for StorageConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some(("fs", root)) if !root.is_empty() => Ok(StorageConfig::Filesystem {
                root: PathBuf::from(root),
            }),
            Some(("sqlite", path)) if !path.is_empty() => Ok(StorageConfig::Sqlite {
                path: PathBuf::from(path),
            }),
            _ => Err(ConfigError::InvalidStorage(s.to_string())),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub storage: StorageConfig,
    pub routes: Vec<RouteBinding>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            storage: StorageConfig::Filesystem {
                root: PathBuf::from("/var/lib/artifact-server"),
            },
            routes: default_routes(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup(ENV_ADDR) {
            config.addr = addr
                .parse()
                .map_err(|e| ConfigError::InvalidAddr(addr.clone(), e))?;
        }

        if let Some(storage) = lookup(ENV_STORAGE) {
            config.storage = storage.parse()?;
        }

        if let Some(file) = lookup(ENV_ROUTES_FILE) {
            let file = PathBuf::from(file);
            let raw = std::fs::read_to_string(&file)
                .map_err(|e| ConfigError::RoutesFile(file.clone(), e))?;
            config.routes = parse_routes(&raw)?;
        }

        validate_routes(&config.routes)?;
        Ok(config)
    }
}

/// One route per response framing existing clients expect, all bound to
/// the same network map blob.
pub fn default_routes() -> Vec<RouteBinding> {
    let locator = StorageLocator::default();

    [
        ("/network-map", BodyRepr::Bytes),
        ("/network-mapBA", BodyRepr::Bytes),
        ("/network-mapBB", BodyRepr::Buffer),
        ("/network-mapBBNW", BodyRepr::Buffer),
        ("/network-mapBANW", BodyRepr::Bytes),
    ]
    .into_iter()
    .map(|(path, repr)| RouteBinding::get(path, locator.clone(), repr))
    .collect()
}

pub fn parse_routes(raw: &str) -> Result<Vec<RouteBinding>, ConfigError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn validate_routes(routes: &[RouteBinding]) -> Result<(), ConfigError> {
    if routes.is_empty() {
        return Err(ConfigError::NoRoutes);
    }

    let mut seen = HashSet::new();
    for route in routes {
        if !route.path.starts_with('/') || route.path.contains(':') || route.path.contains('*') {
            return Err(ConfigError::InvalidPath(route.path.clone()));
        }
        if RESERVED_PATHS.contains(&route.path.as_str()) {
            return Err(ConfigError::ReservedPath(route.path.clone()));
        }
        if !seen.insert(route.path.as_str()) {
            return Err(ConfigError::DuplicatePath(route.path.clone()));
        }
    }
    Ok(())
}
