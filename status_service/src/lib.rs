//! The backend the status view polls once per mount: a single healthcheck
//! route reporting process uptime.

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde::Serialize;
use status_core::{HealthcheckResponse, Uptime, HEALTHCHECK_PATH};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::debug;

pub const DEFAULT_ALLOW_ORIGINS: &str = "http://localhost:3000";

#[derive(Clone)]
pub struct AppState {
    start_time: Instant,
    service_name: Arc<str>,
}

#[derive(Debug, Serialize)]
struct NotFound {
    detail: &'static str,
}

impl AppState {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            start_time: Instant::now(),
            service_name: Arc::from(service_name.into()),
        }
    }

    /// The healthcheck body as of now.
    pub fn health(&self) -> HealthcheckResponse {
        self.health_after(self.start_time.elapsed())
    }

    /// The healthcheck body after `elapsed` time running.
    pub fn health_after(&self, elapsed: Duration) -> HealthcheckResponse {
        HealthcheckResponse::new(
            format!("{} API is healthy!", self.service_name),
            Uptime::from_secs(elapsed.as_secs()),
        )
    }
}

/// Split a comma-separated origin list, dropping blanks.
pub fn parse_allow_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn cors_layer(origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid origin '{}': {}", origin, e))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(HEALTHCHECK_PATH, get(healthcheck))
        .fallback(not_found)
        .with_state(state)
}

/// The router with CORS and request tracing applied.
pub fn app(state: AppState, allow_origins: &[String]) -> anyhow::Result<Router> {
    Ok(router(state)
        .layer(cors_layer(allow_origins)?)
        .layer(TraceLayer::new_for_http()))
}

async fn healthcheck(State(state): State<AppState>) -> Json<HealthcheckResponse> {
    let response = state.health();
    debug!("Healthcheck: {}", response.uptime);
    Json(response)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(NotFound { detail: "Not Found" }))
}
