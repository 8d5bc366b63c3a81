//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`  - Health check: database (public)
//! - `/api/*`       - REST API, see [`crate::api::routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Sessions** - Optional on listings, required on profile routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::{self, RatePolicy};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let public = rate_limit::apply(
        api::routes::public_routes(state.clone()),
        RatePolicy::Public,
        behind_proxy,
    );
    let protected = rate_limit::apply(
        api::routes::protected_routes(state.clone()),
        RatePolicy::Secure,
        behind_proxy,
    );

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", Router::new().merge(public).merge(protected))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
