use std::sync::Arc;

use axum::{
    extract::State,
    http::{
        header::{CONTENT_LENGTH, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

use crate::models::{Artifact, BodyRepr, RouteBinding};
use crate::storage::StorageError;
use crate::AppState;

const OCTET_STREAM: &str = "application/octet-stream";

/// Register one GET route per binding, all served by [`get_artifact`].
pub fn routes(bindings: &[RouteBinding]) -> Router<AppState> {
    bindings.iter().fold(Router::new(), |router, binding| {
        let path = binding.path.clone();
        let binding = Arc::new(binding.clone());
        router.route(
            &path,
            get(move |State(state): State<AppState>| {
                let binding = Arc::clone(&binding);
                async move { get_artifact(state, binding).await }
            }),
        )
    })
}

/// GET <binding.path>
/// Read the bound artifact and return it unmodified
async fn get_artifact(
    state: AppState,
    binding: Arc<RouteBinding>,
) -> Result<Response, ArtifactError> {
    let span = info_span!(
        "get_artifact",
        request_id = %Uuid::new_v4(),
        route = %binding.path,
        repr = %binding.repr,
    );

    async move {
        let content = match state.storage.read_bytes(&binding.locator).await {
            Ok(content) => content,
            Err(e) => {
                match &e {
                    StorageError::NotFound => {
                        warn!("Artifact {} not found", binding.locator)
                    }
                    other => error!("Failed to read artifact {}: {}", binding.locator, other),
                }
                return Err(ArtifactError::from(e));
            }
        };

        let artifact = Artifact::new(content);
        if artifact.is_empty() {
            warn!("Artifact {} is empty", binding.locator);
        }
        debug!("Serving artifact {} ({} bytes)", binding.locator, artifact.len());
        Ok(artifact_response(artifact, binding.repr))
    }
    .instrument(span)
    .await
}

/// Full-body binary response; `repr` only picks the container type.
fn artifact_response(artifact: Artifact, repr: BodyRepr) -> Response {
    let headers = [
        (CONTENT_TYPE, HeaderValue::from_static(OCTET_STREAM)),
        (CONTENT_LENGTH, HeaderValue::from(artifact.len())),
    ];

    match repr {
        BodyRepr::Bytes => (StatusCode::OK, headers, artifact.into_vec()).into_response(),
        BodyRepr::Buffer => (StatusCode::OK, headers, artifact.into_bytes()).into_response(),
    }
}

/// Client-facing failures. Messages never carry storage paths.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found")]
    NotFound,
    #[error("Artifact storage is temporarily unavailable")]
    StorageUnavailable,
    #[error("Internal server error")]
    Internal,
}

impl From<StorageError> for ArtifactError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound => ArtifactError::NotFound,
            StorageError::Unavailable(_) => ArtifactError::StorageUnavailable,
            StorageError::Misconfigured(_) => ArtifactError::Internal,
        }
    }
}

impl IntoResponse for ArtifactError {
    fn into_response(self) -> Response {
        let (status, error_code) = match self {
            ArtifactError::NotFound => (StatusCode::NOT_FOUND, "artifact_not_found"),
            ArtifactError::StorageUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            ArtifactError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        (
            status,
            Json(serde_json::json!({
                "error": error_code,
                "message": self.to_string()
            })),
        )
            .into_response()
    }
}
