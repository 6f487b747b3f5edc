use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::{access_middleware, logging_middleware, metrics_middleware};
use super::proxy;
use super::state::AppState;

/// Create a minimal router without state (for testing/backward compatibility)
/// Note: /ready and the account routes are not available without state
pub fn create_router() -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .layer(TraceLayer::new_for_http())
}

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints (no access check)
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Account scoped routes, forwarded only when access is granted
        .merge(create_adm_router(state.clone()))
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn create_adm_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/adm/{parent_account}", any(proxy::forward_handler))
        .route("/adm/{parent_account}/", any(proxy::forward_handler))
        .route("/adm/{parent_account}/{*rest}", any(proxy::forward_handler))
        .route_layer(middleware::from_fn_with_state(state, access_middleware))
}
