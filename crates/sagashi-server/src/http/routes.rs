//! HTTP API Route Definitions

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, AppState};

/// Create the API router with all routes
pub fn create_router(app_state: AppState) -> Router {
    let api = Router::new()
        .route("/match", post(handlers::match_title))
        .route("/rank", post(handlers::rank_titles))
        .route("/slug-match", post(handlers::slug_match))
        .route("/episode", post(handlers::episode))
        .route("/qualities", post(handlers::qualities));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api", api)
        // Short links and redirect resolution
        .route("/q", get(handlers::shorten))
        .route("/vid/:id", get(handlers::redirect_short_link))
        .route("/resolve", get(handlers::resolve_redirects))
        .with_state(app_state)
}
