//! Bearer session middleware.
//!
//! Two flavours share one lookup:
//!
//! - [`optional`] lets anonymous requests through as [`Viewer`]`(None)`
//! - [`required`] rejects them with `401 Unauthorized`
//!
//! A presented but unknown or revoked token is rejected by both.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

/// The caller of an endpoint that also serves anonymous users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer(pub Option<Uuid>);

/// The authenticated caller of a protected endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionUser(pub Uuid);

fn has_authorization(parts: &Parts) -> bool {
    parts
        .headers
        .contains_key(axum::http::header::AUTHORIZATION)
}

async fn bearer_user(st: &AppState, parts: &mut Parts) -> Result<Uuid, AppError> {
    let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    st.auth_service.authenticate(&token).await
}

/// Resolves the session if an `Authorization` header is present.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Inserts a [`Viewer`] extension: `Viewer(None)` without a header,
/// `Viewer(Some(user_id))` for a valid session.
///
/// # Errors
///
/// Returns `401 Unauthorized` for a malformed header or an unknown or
/// revoked token.
pub async fn optional(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let viewer = if has_authorization(&parts) {
        Viewer(Some(bearer_user(&st, &mut parts).await?))
    } else {
        Viewer(None)
    };

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(viewer);

    Ok(next.run(req).await)
}

/// Requires a valid session and inserts it as a [`SessionUser`] extension.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed, or the
/// token is unknown or revoked. Adds `WWW-Authenticate: Bearer` per RFC 6750.
pub async fn required(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let user_id = bearer_user(&st, &mut parts).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(SessionUser(user_id));

    Ok(next.run(req).await)
}
