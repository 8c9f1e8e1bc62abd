use axum::{
    extract::State,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod artifacts;
mod config;
mod models;
mod storage;

use config::ServerConfig;
use models::RouteBinding;
use storage::SharedStorage;

#[derive(Clone)]
pub struct AppState {
    storage: SharedStorage,
    started_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artifact_server=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    let storage = storage::open(&config.storage).await?;
    info!("Artifact storage ready ({})", storage.describe());

    for route in &config.routes {
        info!("Binding GET {} -> {} ({})", route.path, route.locator, route.repr);
    }

    let state = AppState {
        storage,
        started_at: Utc::now(),
    };
    let app = app(state, &config.routes);

    info!("listening on {}", config.addr);

    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn app(state: AppState, routes: &[RouteBinding]) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ping", get(ping))
        .merge(artifacts::routes(routes))
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: state.storage.describe().to_string(),
        started_at: state.started_at,
    })
}

async fn ping() -> &'static [u8] {
    b"OK"
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    storage: String,
    started_at: DateTime<Utc>,
}
