//! Handlers for the caller's own profile.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::api::dto::profile::{
    ProfileResponse, RegisterBusinessRequest, RegisterCourierRequest, UpdateAvatarRequest,
};
use crate::api::middleware::SessionUser;
use crate::application::services::Profile;
use crate::error::AppError;
use crate::state::AppState;
use validator::Validate;

/// Returns the caller's profile.
///
/// # Endpoint
///
/// `GET /api/profile`
///
/// # Errors
///
/// - `401 Unauthorized` without a valid session
/// - `404 Not Found` if the caller has not registered yet
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = state.profile_service.get_profile(user_id).await?;
    Ok(Json(profile.into()))
}

/// Registers the caller as a courier.
///
/// # Endpoint
///
/// `POST /api/profile/courier`
///
/// # Response
///
/// `201 Created` with the stored profile.
///
/// # Errors
///
/// - `400 Bad Request` with per-field messages for invalid input
/// - `409 Conflict` if the caller already has a courier or business profile
pub async fn register_courier_handler(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Json(payload): Json<RegisterCourierRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let new = payload.into_new_courier()?;
    let courier = state.profile_service.register_courier(user_id, new).await?;

    Ok((
        StatusCode::CREATED,
        Json(Profile::Courier(courier).into()),
    ))
}

/// Registers the caller as a business.
///
/// # Endpoint
///
/// `POST /api/profile/business`
///
/// # Response
///
/// `201 Created` with the stored profile.
///
/// # Errors
///
/// - `400 Bad Request` with per-field messages for invalid input
/// - `409 Conflict` if the caller already has a courier or business profile
pub async fn register_business_handler(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Json(payload): Json<RegisterBusinessRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let new = payload.into_new_business()?;
    let business = state
        .profile_service
        .register_business(user_id, new)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Profile::Business(business).into()),
    ))
}

/// Points the caller's avatar at an already uploaded image.
///
/// # Endpoint
///
/// `PUT /api/profile/avatar`
///
/// # Request Body
///
/// ```json
/// { "avatar_url": "https://cdn.example.com/avatars/42.png" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request` unless `avatar_url` is an absolute http(s) URL
/// - `404 Not Found` if the caller has no profile
pub async fn update_avatar_handler(
    State(state): State<AppState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Json(payload): Json<UpdateAvatarRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    payload.validate()?;

    let profile = state
        .profile_service
        .update_avatar(user_id, &payload.avatar_url)
        .await?;

    Ok(Json(profile.into()))
}
