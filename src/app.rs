use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{self, AppState};

/// Request bodies are tiny JSON objects; 1 MiB is generous.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Builds the relay router with its middleware stack.
///
/// Oversized bodies surface as a JSON rejection inside the handlers, so they
/// get the same `{"error": ...}` 400 as any other unreadable body.
pub fn build_router(state: Arc<AppState>) -> Router {
    let relay_routes = Router::new()
        .route("/get-token", get(handlers::get_token))
        .route("/enrich", post(handlers::enrich))
        .route("/search-candidates", post(handlers::search_candidates))
        .route("/query-person", post(handlers::query_person))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(relay_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
