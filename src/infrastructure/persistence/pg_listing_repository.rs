//! PostgreSQL implementation of the listing repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use super::corrupt_row;
use crate::domain::entities::{BusinessAd, CourierCard, InvalidAttribute};
use crate::domain::filters::ListingQuery;
use crate::domain::repositories::{Collection, CourierSource, ListingRepository};
use crate::error::AppError;

const AD_COLUMNS: &str =
    "id, title, description, province, district, working_type, working_hours, created_at";

const COURIER_CARD_COLUMNS: &str = "id, first_name, last_name, avatar_url, phone, province, \
     district, license_type, working_type, working_hours, created_at";

#[derive(Debug, FromRow)]
struct AdRow {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    province: String,
    district: String,
    working_type: String,
    working_hours: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdRow> for BusinessAd {
    type Error = InvalidAttribute;

    fn try_from(row: AdRow) -> Result<Self, Self::Error> {
        Ok(BusinessAd {
            id: row.id,
            title: row.title,
            description: row.description,
            province: row.province,
            district: row.district,
            working_type: row.working_type.parse()?,
            working_hours: row.working_hours.parse()?,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct CourierCardRow {
    id: i64,
    first_name: Option<String>,
    last_name: Option<String>,
    avatar_url: Option<String>,
    phone: Option<String>,
    province: String,
    district: String,
    license_type: String,
    working_type: String,
    working_hours: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CourierCardRow> for CourierCard {
    type Error = InvalidAttribute;

    fn try_from(row: CourierCardRow) -> Result<Self, Self::Error> {
        Ok(CourierCard {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            avatar_url: row.avatar_url,
            phone: row.phone,
            province: row.province,
            district: row.district,
            license_type: row.license_type.parse()?,
            working_type: row.working_type.parse()?,
            working_hours: row.working_hours.parse()?,
            created_at: row.created_at,
        })
    }
}

/// Builds `SELECT .. FROM .. WHERE col = $n .. ORDER BY created_at DESC LIMIT $m`.
///
/// Column and table names come from closed enums; only values are bound.
fn listing_select<'q>(
    columns: &str,
    collection: Collection,
    query: &'q ListingQuery,
) -> QueryBuilder<'q, Postgres> {
    let mut builder = QueryBuilder::new(format!(
        "SELECT {columns} FROM {} WHERE TRUE",
        collection.table()
    ));

    for condition in query.conditions() {
        builder
            .push(" AND ")
            .push(condition.key.column())
            .push(" = ")
            .push_bind(condition.value.as_str());
    }

    builder
        .push(" ORDER BY created_at DESC LIMIT ")
        .push_bind(i64::try_from(query.limit()).unwrap_or(i64::MAX));
    builder
}

/// PostgreSQL repository for listing reads.
///
/// Uses runtime-built queries since the filter set varies per request.
pub struct PgListingRepository {
    pool: Arc<PgPool>,
}

impl PgListingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListingRepository for PgListingRepository {
    async fn fetch_business_ads(&self, query: &ListingQuery) -> Result<Vec<BusinessAd>, AppError> {
        let rows: Vec<AdRow> = listing_select(AD_COLUMNS, Collection::BusinessAds, query)
            .build_query_as()
            .fetch_all(self.pool.as_ref())
            .await?;

        rows.into_iter()
            .map(|row| BusinessAd::try_from(row).map_err(corrupt_row))
            .collect()
    }

    async fn fetch_couriers(
        &self,
        source: CourierSource,
        query: &ListingQuery,
    ) -> Result<Vec<CourierCard>, AppError> {
        let rows: Vec<CourierCardRow> =
            listing_select(COURIER_CARD_COLUMNS, source.collection(), query)
                .build_query_as()
                .fetch_all(self.pool.as_ref())
                .await?;

        rows.into_iter()
            .map(|row| CourierCard::try_from(row).map_err(corrupt_row))
            .collect()
    }
}
