//! API route configuration.
//!
//! Session handling is attached per group through
//! [`crate::api::middleware::session`]; rate limits are added by the
//! top-level router.

use crate::api::handlers::{
    get_profile_handler, listings_handler, register_business_handler, register_courier_handler,
    update_avatar_handler,
};
use crate::api::middleware::session;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post, put},
};

/// Routes that serve anonymous and authenticated callers alike.
///
/// # Endpoints
///
/// - `GET /listings` - Listing for the caller's role (paginated)
pub fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/listings", get(listings_handler))
        .route_layer(middleware::from_fn_with_state(state, session::optional))
}

/// Routes that require a Bearer session.
///
/// # Endpoints
///
/// - `GET  /profile`          - The caller's profile
/// - `POST /profile/courier`  - Register as a courier
/// - `POST /profile/business` - Register as a business
/// - `PUT  /profile/avatar`   - Replace the avatar URL
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile_handler))
        .route("/profile/courier", post(register_courier_handler))
        .route("/profile/business", post(register_business_handler))
        .route("/profile/avatar", put(update_avatar_handler))
        .route_layer(middleware::from_fn_with_state(state, session::required))
}

/// All `/api` routes without rate limiting.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes(state.clone()))
        .merge(protected_routes(state))
}
