//! API routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{clear_data, health, render_video};
use crate::middleware::cors_layer;
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let outputs_dir = state.store.root().to_path_buf();

    let api_routes = Router::new()
        .route("/render", post(render_video))
        .route("/clear-data", post(clear_data));

    let health_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(api_routes)
        .merge(health_routes)
        // Published artifacts are served straight from the output store
        .nest_service("/outputs", ServeDir::new(outputs_dir))
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
