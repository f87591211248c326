use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/live", get(liveness))
        .route("/ready", get(readiness))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "uptimeSecs": state.uptime_secs(),
        "vocabulary": {
            "entries": state.vocab().len(),
        },
        "sessions": {
            "active": state.sessions().len().await,
            "capacity": state.sessions().capacity(),
        }
    }))
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// Ready once a non-empty vocabulary is in memory.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let entries = state.vocab().len();
    let status = if entries > 0 {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(serde_json::json!({ "entries": entries })))
}
