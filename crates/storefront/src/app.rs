//! Router assembly.

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;

use crate::middleware::{
    create_session_layer, csp_nonce_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::routes;
use crate::state::AppState;

/// Build the full application router with the middleware stack applied.
///
/// Used by the binary and by integration tests, which drive it directly
/// with `tower::ServiceExt`.
#[must_use]
pub fn build_router(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/storefront/static"))
        .layer(from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(from_fn(csp_nonce_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
