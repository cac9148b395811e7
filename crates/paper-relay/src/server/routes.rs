//! HTTP routes and handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::HeaderValue,
    response::IntoResponse,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::batcher::Batcher;
use crate::client::PaperAgent;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::{ResultPage, SearchAck, SearchRequest};

/// Shared state for HTTP handlers. Holds no per-session data.
pub struct AppState {
    pub agent: Arc<dyn PaperAgent>,
    pub batcher: Batcher,
}

/// Create the HTTP router for the relay.
///
/// # Errors
///
/// Returns error if the configuration does not validate.
pub fn create_router(agent: Arc<dyn PaperAgent>, config: &Config) -> anyhow::Result<Router> {
    config.validate()?;
    let state = Arc::new(AppState { agent, batcher: Batcher::new(config.batch_size) });

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api/papers/search", post(search_papers))
        .route("/api/papers/results/{session_id}", post(get_results))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.allowed_origins)),
        )
        .with_state(state);

    Ok(router)
}

/// CORS for the configured origins, mirroring any method and header.
///
/// Credentials rule out wildcards, so methods and headers are mirrored.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "paper-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// `POST /api/papers/search`
///
/// Relay a search start to the agent and echo the caller's session id.
async fn search_papers(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchAck>, ApiError> {
    tracing::info!(session_id = ?req.session_id, "Starting paper search");

    state
        .agent
        .start_search(&req.query, req.session_id.as_deref())
        .await
        .map_err(ApiError::StartSearch)?;

    Ok(Json(SearchAck::initiated(req.session_id)))
}

/// `POST /api/papers/results/{session_id}`
///
/// Fetch the agent's snapshot for a session and return one ranked page.
async fn get_results(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<ResultPage>, ApiError> {
    let raw = state.agent.fetch_results(&session_id).await.map_err(ApiError::FetchResults)?;
    let page = state.batcher.batch(&raw)?;

    tracing::info!(
        session_id = %session_id,
        total = page.total,
        returned = page.len(),
        finish = page.finish,
        "Served result page"
    );

    Ok(Json(page))
}
