//! Repository trait for cross-role listing reads.

use crate::domain::entities::{BusinessAd, CourierCard};
use crate::domain::filters::ListingQuery;
use crate::error::AppError;
use async_trait::async_trait;
use std::fmt;

/// Named resources exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Couriers,
    CouriersPublic,
    BusinessAds,
}

impl Collection {
    /// Relation name in the database.
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Couriers => "couriers",
            Collection::CouriersPublic => "couriers_public",
            Collection::BusinessAds => "business_ads",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// Where courier cards are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourierSource {
    /// The read-optimized `couriers_public` projection.
    PublicView,
    /// The `couriers` base table.
    BaseTable,
}

impl CourierSource {
    pub fn collection(&self) -> Collection {
        match self {
            CourierSource::PublicView => Collection::CouriersPublic,
            CourierSource::BaseTable => Collection::Couriers,
        }
    }
}

/// Read access to the listings each role browses.
///
/// Implementations apply every condition of the [`ListingQuery`] as an
/// equality filter, order by `created_at` descending and cap the result at
/// [`ListingQuery::limit`]. A read either returns rows or fails as a whole.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgListingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// Reads business ads.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn fetch_business_ads(&self, query: &ListingQuery) -> Result<Vec<BusinessAd>, AppError>;

    /// Reads courier cards from the given source.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the source is missing, access is
    /// denied, or any other database error occurs.
    async fn fetch_couriers(
        &self,
        source: CourierSource,
        query: &ListingQuery,
    ) -> Result<Vec<CourierCard>, AppError>;
}
