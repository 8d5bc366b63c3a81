//! DTOs for the listings endpoint.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::collections::HashMap;

use super::pagination::PaginationMeta;
use crate::domain::entities::{Listing, Role};

/// Query string of `GET /api/listings`.
///
/// `page` is parsed with `serde_with`; every other key is collected raw and
/// turned into [`crate::domain::filters::ListingFilters`] by the handler, so
/// unknown keys can be reported instead of silently ignored.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ListingsQuery {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<usize>,

    #[serde(flatten)]
    pub filters: HashMap<String, String>,
}

/// One page of the listing the caller's role browses.
#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub role: Role,
    pub title: &'static str,
    pub items: Vec<Listing>,
    pub pagination: PaginationMeta,
    /// Reason the listing is empty because of a failure; `null` otherwise.
    pub message: Option<&'static str>,
}
