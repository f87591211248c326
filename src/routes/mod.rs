pub mod health;
pub mod sessions;
pub mod vocab;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::middleware::request_id;
use crate::state::AppState;

/// Request bodies here are tiny JSON objects.
const MAX_BODY_SIZE: usize = 16 * 1024;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .nest("/vocab", vocab::router())
        .nest("/sessions", sessions::router())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE));

    let static_dir = state.config().static_dir.clone();
    let index = format!("{static_dir}/index.html");
    let front_end = ServeDir::new(&static_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health::router())
        .fallback_service(front_end)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}
