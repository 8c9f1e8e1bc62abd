use serde::Deserialize;

use super::artifact::StorageLocator;

/// Byte container handed to the response builder. Never changes the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyRepr {
    /// Owned byte vector
    #[default]
    Bytes,
    /// Shared reference-counted buffer
    Buffer,
}

impl std::fmt::Display for BodyRepr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyRepr::Bytes => write!(f, "bytes"),
            BodyRepr::Buffer => write!(f, "buffer"),
        }
    }
}

/// Only GET is served; HEAD is answered by the router for GET routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    #[default]
    Get,
}

/// One entry of the route table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteBinding {
    #[serde(default)]
    pub method: RouteMethod,
    pub path: String,
    pub locator: StorageLocator,
    #[serde(default)]
    pub repr: BodyRepr,
}

impl RouteBinding {
    pub fn get(path: impl Into<String>, locator: StorageLocator, repr: BodyRepr) -> Self {
        Self {
            method: RouteMethod::Get,
            path: path.into(),
            locator,
            repr,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_repr_display() {
        assert_eq!(BodyRepr::Bytes.to_string(), "bytes");
        assert_eq!(BodyRepr::Buffer.to_string(), "buffer");
    }

    #[test]
    fn test_route_binding_rejects_unknown_repr() {
        let result = serde_json::from_str::<RouteBinding>(
            r#"{"path": "/x", "locator": "a.ser", "repr": "bytebuffer"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_route_binding_defaults() {
        let binding: RouteBinding = serde_json::from_str(
            r#"{"path": "/network-map", "locator": "networkmap/network-map.ser"}"#,
        )
        .unwrap();
        assert_eq!(binding.method, RouteMethod::Get);
        assert_eq!(binding.repr, BodyRepr::Bytes);
        assert_eq!(binding.locator.as_str(), "networkmap/network-map.ser");
    }

    #[test]
    fn test_route_binding_rejects_post() {
        let result = serde_json::from_str::<RouteBinding>(
            r#"{"method": "POST", "path": "/x", "locator": "a.ser"}"#,
        );
        assert!(result.is_err());
    }
}
