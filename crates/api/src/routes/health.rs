use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the customer directory could be read.
    pub directory_available: bool,
    /// Whether all Google Ads credentials are present.
    pub ads_configured: bool,
}

/// GET /health -- liveness plus the state of both dependencies.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let directory_available = state.directory.list_customers().await.unavailable.is_none();
    let ads_configured = state.ads.is_configured();

    let status = if directory_available && ads_configured {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        directory_available,
        ads_configured,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
