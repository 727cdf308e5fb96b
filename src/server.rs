//! Router assembly shared by the binary and the integration tests.

use crate::auth::require_api_key;
use crate::docs::ApiDoc;
use crate::handlers::{self, AppState};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Routes that require a valid API key.
pub fn api_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/credit-score", post(handlers::credit_score))
        .route_layer(middleware::from_fn_with_state(state, require_api_key))
}

/// Combines `api` with the open routes (health check, API docs) and the
/// shared layers. The binary wraps `api` in a rate limiter first.
pub fn assemble(
    state: Arc<AppState>,
    api: Router<Arc<AppState>>,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Full router without rate limiting.
pub fn build_router(state: Arc<AppState>, max_body_bytes: usize) -> Router {
    assemble(state.clone(), api_routes(state), max_body_bytes)
}
