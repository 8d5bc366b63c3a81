//! Handler for the role-aware listings endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::listings::{ListingsQuery, ListingsResponse};
use crate::api::dto::pagination::PaginationMeta;
use crate::api::middleware::Viewer;
use crate::domain::entities::LISTING_PAGE_SIZE;
use crate::domain::filters::ListingFilters;
use crate::domain::pagination::page_slice;
use crate::error::AppError;
use crate::state::AppState;

/// Returns one page of the listing the caller's role browses.
///
/// # Endpoint
///
/// `GET /api/listings`
///
/// Couriers see business ads, businesses see couriers. Anonymous callers and
/// users without a profile get an empty listing; no query is issued for them.
///
/// # Query Parameters
///
/// - `province`, `district` (optional): exact match
/// - `working_type` (optional): `tam`, `yari` or `serbest`
/// - `working_hours` (optional): `gunduz`, `gece` or `24`
/// - `license_type` (optional): `A1`, `A2` or `A`; ignored for couriers
/// - `page` (optional): 1-based page of 6 items (default: 1)
///
/// # Response
///
/// ```json
/// {
///   "role": "isletme",
///   "title": "KURYELER",
///   "items": [{ "kind": "courier", "id": 7, "province": "Ankara", ... }],
///   "pagination": { "page": 1, "page_size": 6, "total_items": 13, "total_pages": 3 },
///   "message": null
/// }
/// ```
///
/// A listing that could not be read is still `200 OK`, with empty `items`
/// and the reason in `message`.
///
/// # Errors
///
/// - `400 Bad Request` for unknown filter keys, invalid enum values or a
///   non-numeric page
/// - `401 Unauthorized` for an invalid or revoked session token
pub async fn listings_handler(
    State(state): State<AppState>,
    Extension(Viewer(user_id)): Extension<Viewer>,
    query: Result<Query<ListingsQuery>, QueryRejection>,
) -> Result<Json<ListingsResponse>, AppError> {
    let Query(params) =
        query.map_err(|e| AppError::bad_request(e.body_text(), json!({ "field": "page" })))?;

    let filters = ListingFilters::from_pairs(&params.filters)?;
    let page = params.page.unwrap_or(1);

    let role = state.role_service.classify(user_id).await?;
    let outcome = state.listing_service.resolve(role, &filters).await;

    let total_items = outcome.items.len();
    let items = page_slice(&outcome.items, page, LISTING_PAGE_SIZE).to_vec();

    Ok(Json(ListingsResponse {
        role,
        title: role.listing_title(),
        items,
        pagination: PaginationMeta::new(page, LISTING_PAGE_SIZE, total_items),
        message: outcome.message(),
    }))
}
