//! API Routes
//!
//! Builds the Axum router. Every path answers exactly one method; any other
//! method gets a 405 in the usual response envelope.

use axum::{
    routing::{delete, get, post, MethodRouter},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    delete_handler, get_handler, health_handler, root_handler, set_handler, stats_handler,
    AppState,
};
use crate::error::CacheError;

/// Restricts `route` to `method`, replacing axum's empty 405 with an error
/// envelope naming the allowed method.
fn only(method: &'static str, route: MethodRouter<AppState>) -> MethodRouter<AppState> {
    route.fallback(move || async move { CacheError::MethodNotAllowed(method) })
}

/// Creates the cache router.
///
/// CORS allows any origin, method and header. Requests are traced through
/// `tower_http`.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", only("GET", get(root_handler)))
        .route("/api/cache/set", only("POST", post(set_handler)))
        .route("/api/cache/get", only("GET", get(get_handler)))
        .route("/api/cache/delete", only("DELETE", delete(delete_handler)))
        .route("/api/cache/stats", only("GET", get(stats_handler)))
        .route("/health", only("GET", get(health_handler)))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
