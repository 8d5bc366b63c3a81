//! Role-aware listing resolution with a fallback read path.
//!
//! A courier browses business ads; a business browses couriers. The courier
//! listing prefers the `couriers_public` projection and falls back to the
//! `couriers` table with the identical query when the projection cannot be
//! read. Failures never escape [`ListingService::resolve`]: they end the
//! fetch with an empty [`ListingOutcome`] whose status explains why.
//!
//! Each fetch walks a linear state machine:
//!
//! ```text
//! Idle ─▶ PrimaryInFlight ─┬─▶ Done
//!                          └─▶ FallbackInFlight ─┬─▶ Done
//!                                                └─▶ Failed
//! ```
//!
//! The business ad read has no fallback, so its primary failure goes
//! straight to `Failed`.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{
    LISTING_LIMIT, Listing, ListingOutcome, ListingStatus, Role,
};
use crate::domain::filters::{ListingFilters, ListingQuery};
use crate::domain::repositories::{Collection, CourierSource, ListingRepository};
use crate::error::AppError;

/// Default upper bound for a single read.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

/// Progress of one listing fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    PrimaryInFlight,
    FallbackInFlight,
    Done,
    Failed,
}

impl FetchState {
    /// State after the in-flight read succeeds.
    pub fn on_success(self) -> FetchState {
        match self {
            FetchState::PrimaryInFlight | FetchState::FallbackInFlight => FetchState::Done,
            other => other,
        }
    }

    /// State after the in-flight read fails.
    pub fn on_failure(self, has_fallback: bool) -> FetchState {
        match self {
            FetchState::PrimaryInFlight if has_fallback => FetchState::FallbackInFlight,
            FetchState::PrimaryInFlight | FetchState::FallbackInFlight => FetchState::Failed,
            other => other,
        }
    }
}

/// One read the resolver may issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadTarget {
    BusinessAds,
    Couriers(CourierSource),
}

impl ReadTarget {
    fn collection(self) -> Collection {
        match self {
            ReadTarget::BusinessAds => Collection::BusinessAds,
            ReadTarget::Couriers(source) => source.collection(),
        }
    }
}

const AD_READS: &[ReadTarget] = &[ReadTarget::BusinessAds];

/// Projection first, then the base table with the same query.
const COURIER_READS: &[ReadTarget] = &[
    ReadTarget::Couriers(CourierSource::PublicView),
    ReadTarget::Couriers(CourierSource::BaseTable),
];

/// Why a single read produced no rows.
#[derive(Debug, thiserror::Error)]
enum ReadFailure {
    #[error("query failed: {0}")]
    Query(#[from] AppError),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Resolves the listing a role may browse.
pub struct ListingService {
    repository: Arc<dyn ListingRepository>,
    read_timeout: Duration,
}

impl ListingService {
    /// Creates a resolver with [`DEFAULT_READ_TIMEOUT`].
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self::with_timeout(repository, DEFAULT_READ_TIMEOUT)
    }

    pub fn with_timeout(repository: Arc<dyn ListingRepository>, read_timeout: Duration) -> Self {
        Self {
            repository,
            read_timeout,
        }
    }

    /// Fetches the opposite role's listing, newest first, at most
    /// [`LISTING_LIMIT`] records.
    ///
    /// [`Role::Unknown`] is inert: no read is issued and the outcome is empty
    /// with no status message.
    pub async fn resolve(&self, role: Role, filters: &ListingFilters) -> ListingOutcome {
        let Some(query) = filters.query_for(role) else {
            return ListingOutcome::empty();
        };

        let (targets, failure_status) = match role {
            Role::Courier => (AD_READS, ListingStatus::Failed),
            Role::Business => (COURIER_READS, ListingStatus::Unavailable),
            Role::Unknown => return ListingOutcome::empty(),
        };

        let mut state = FetchState::Idle;
        advance(&mut state, FetchState::PrimaryInFlight, role);

        for (attempt, target) in targets.iter().enumerate() {
            match self.read(*target, &query).await {
                Ok(items) => {
                    let next = state.on_success();
                    advance(&mut state, next, role);
                    return ListingOutcome::ready(newest_first(items));
                }
                Err(failure) => {
                    let has_fallback = attempt + 1 < targets.len();
                    tracing::warn!(
                        role = role.as_str(),
                        collection = %target.collection(),
                        error = %failure,
                        has_fallback,
                        "listing read failed"
                    );
                    let next = state.on_failure(has_fallback);
                    advance(&mut state, next, role);
                    if has_fallback {
                        metrics::counter!("listing_fallbacks_total").increment(1);
                    }
                }
            }
        }

        metrics::counter!("listing_failures_total", "role" => role.as_str()).increment(1);
        ListingOutcome::failed(failure_status)
    }

    async fn read(
        &self,
        target: ReadTarget,
        query: &ListingQuery,
    ) -> Result<Vec<Listing>, ReadFailure> {
        metrics::counter!("listing_reads_total", "collection" => target.collection().table())
            .increment(1);

        let read = async {
            let items: Vec<Listing> = match target {
                ReadTarget::BusinessAds => self
                    .repository
                    .fetch_business_ads(query)
                    .await?
                    .into_iter()
                    .map(Listing::Ad)
                    .collect(),
                ReadTarget::Couriers(source) => self
                    .repository
                    .fetch_couriers(source, query)
                    .await?
                    .into_iter()
                    .map(Listing::Courier)
                    .collect(),
            };
            Ok::<_, AppError>(items)
        };

        let items = tokio::time::timeout(self.read_timeout, read)
            .await
            .map_err(|_| ReadFailure::Timeout(self.read_timeout))??;

        Ok(items)
    }
}

fn advance(state: &mut FetchState, next: FetchState, role: Role) {
    if *state != next {
        tracing::debug!(role = role.as_str(), from = ?*state, to = ?next, "listing fetch");
        *state = next;
    }
}

/// Enforces ordering and bound regardless of what the backend returned.
fn newest_first(mut items: Vec<Listing>) -> Vec<Listing> {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    items.truncate(LISTING_LIMIT);
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{
        BusinessAd, CourierCard, LicenseType, WorkingHours, WorkingType,
    };
    use crate::domain::filters::FilterKey;
    use crate::domain::repositories::MockListingRepository;
    use chrono::{Duration as ChronoDuration, Utc};
    use serde_json::json;

    fn ad(id: i64, minutes_ago: i64, province: &str, working_type: WorkingType) -> BusinessAd {
        BusinessAd {
            id,
            title: Some(format!("İlan {id}")),
            description: None,
            province: province.to_string(),
            district: "Merkez".to_string(),
            working_type,
            working_hours: WorkingHours::Gunduz,
            created_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        }
    }

    fn card(id: i64, minutes_ago: i64) -> CourierCard {
        CourierCard {
            id,
            first_name: Some("Ali".to_string()),
            last_name: Some("Veli".to_string()),
            avatar_url: None,
            phone: Some("+905551112233".to_string()),
            province: "Ankara".to_string(),
            district: "Çankaya".to_string(),
            license_type: LicenseType::A2,
            working_type: WorkingType::Tam,
            working_hours: WorkingHours::Gece,
            created_at: Utc::now() - ChronoDuration::minutes(minutes_ago),
        }
    }

    fn db_error() -> AppError {
        AppError::internal("Database error", json!({}))
    }

    fn filters(pairs: &[(&str, &str)]) -> ListingFilters {
        ListingFilters::from_pairs(pairs.iter().copied()).unwrap()
    }

    #[test]
    fn test_state_machine_transitions() {
        let primary = FetchState::PrimaryInFlight;

        assert_eq!(primary.on_success(), FetchState::Done);
        assert_eq!(primary.on_failure(true), FetchState::FallbackInFlight);
        assert_eq!(primary.on_failure(false), FetchState::Failed);
        assert_eq!(FetchState::FallbackInFlight.on_failure(true), FetchState::Failed);
        assert_eq!(FetchState::FallbackInFlight.on_success(), FetchState::Done);
        assert_eq!(FetchState::Done.on_failure(true), FetchState::Done);
        assert_eq!(FetchState::Idle.on_success(), FetchState::Idle);
    }

    #[tokio::test]
    async fn test_unknown_role_issues_no_reads() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo.expect_fetch_business_ads().never();
        mock_repo.expect_fetch_couriers().never();

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Unknown, &ListingFilters::default()).await;

        assert!(outcome.items.is_empty());
        assert!(outcome.message().is_none());
    }

    #[tokio::test]
    async fn test_courier_reads_business_ads_once() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_business_ads()
            .withf(|q| q.conditions().is_empty() && q.limit() == 60)
            .times(1)
            .returning(|_| Ok(vec![ad(1, 5, "Ankara", WorkingType::Tam)]));
        mock_repo.expect_fetch_couriers().never();

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Courier, &ListingFilters::default()).await;

        assert_eq!(outcome.status, ListingStatus::Ready);
        assert_eq!(outcome.items.len(), 1);
        assert!(matches!(outcome.items[0], Listing::Ad(_)));
    }

    #[tokio::test]
    async fn test_courier_failure_has_no_fallback() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_business_ads()
            .times(1)
            .returning(|_| Err(db_error()));
        mock_repo.expect_fetch_couriers().never();

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Courier, &ListingFilters::default()).await;

        assert!(outcome.items.is_empty());
        assert_eq!(outcome.status, ListingStatus::Failed);
        assert!(outcome.message().is_some());
    }

    #[tokio::test]
    async fn test_business_primary_success_skips_fallback() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_couriers()
            .withf(|source, _| *source == CourierSource::PublicView)
            .times(1)
            .returning(|_, _| Ok(vec![card(1, 1)]));
        mock_repo
            .expect_fetch_couriers()
            .withf(|source, _| *source == CourierSource::BaseTable)
            .never();

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Business, &ListingFilters::default()).await;

        assert_eq!(outcome.status, ListingStatus::Ready);
        assert_eq!(outcome.items.len(), 1);
    }

    #[tokio::test]
    async fn test_business_fallback_reuses_identical_filters() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_couriers()
            .withf(|source, _| *source == CourierSource::PublicView)
            .times(1)
            .returning(|_, _| Err(db_error()));
        mock_repo
            .expect_fetch_couriers()
            .withf(|source, q| {
                *source == CourierSource::BaseTable
                    && q.conditions().len() == 1
                    && q.conditions()[0].key == FilterKey::Province
                    && q.conditions()[0].value == "Ankara"
                    && q.limit() == 60
            })
            .times(1)
            .returning(|_, _| Ok(vec![card(42, 3)]));

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service
            .resolve(Role::Business, &filters(&[("province", "Ankara")]))
            .await;

        assert_eq!(outcome.status, ListingStatus::Ready);
        assert_eq!(outcome.items.len(), 1);
        assert_eq!(outcome.items[0].id(), 42);
    }

    #[tokio::test]
    async fn test_business_both_reads_fail() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_couriers()
            .times(2)
            .returning(|_, _| Err(db_error()));

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Business, &ListingFilters::default()).await;

        assert!(outcome.items.is_empty());
        assert_eq!(outcome.status, ListingStatus::Unavailable);
        assert!(outcome.message().unwrap().contains("couriers_public"));
    }

    #[tokio::test]
    async fn test_results_sorted_newest_first_and_capped() {
        let mut mock_repo = MockListingRepository::new();
        mock_repo.expect_fetch_business_ads().returning(|_| {
            Ok((0..75)
                .map(|i| ad(i, (i * 7) % 75, "İzmir", WorkingType::Yari))
                .collect())
        });

        let service = ListingService::new(Arc::new(mock_repo));
        let outcome = service.resolve(Role::Courier, &ListingFilters::default()).await;

        assert_eq!(outcome.items.len(), LISTING_LIMIT);
        assert!(
            outcome
                .items
                .windows(2)
                .all(|w| w[0].created_at() >= w[1].created_at())
        );
    }

    #[tokio::test]
    async fn test_resolve_is_idempotent() {
        let fixed = vec![ad(1, 10, "Ankara", WorkingType::Tam), ad(2, 1, "Ankara", WorkingType::Tam)];
        let mut mock_repo = MockListingRepository::new();
        mock_repo
            .expect_fetch_business_ads()
            .times(2)
            .returning(move |_| Ok(fixed.clone()));

        let service = ListingService::new(Arc::new(mock_repo));
        let f = filters(&[("province", "Ankara")]);

        let first = service.resolve(Role::Courier, &f).await;
        let second = service.resolve(Role::Courier, &f).await;

        assert_eq!(first, second);
        assert_eq!(first.items[0].id(), 2);
    }

    struct SlowPrimary;

    #[async_trait::async_trait]
    impl ListingRepository for SlowPrimary {
        async fn fetch_business_ads(&self, _q: &ListingQuery) -> Result<Vec<BusinessAd>, AppError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![])
        }

        async fn fetch_couriers(
            &self,
            source: CourierSource,
            _q: &ListingQuery,
        ) -> Result<Vec<CourierCard>, AppError> {
            match source {
                CourierSource::PublicView => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok(vec![])
                }
                CourierSource::BaseTable => Ok(vec![card(9, 0)]),
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_timeout_triggers_fallback() {
        let service =
            ListingService::with_timeout(Arc::new(SlowPrimary), Duration::from_millis(200));

        let outcome = service.resolve(Role::Business, &ListingFilters::default()).await;

        assert_eq!(outcome.status, ListingStatus::Ready);
        assert_eq!(outcome.items[0].id(), 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ad_timeout_fails() {
        let service =
            ListingService::with_timeout(Arc::new(SlowPrimary), Duration::from_millis(200));

        let outcome = service.resolve(Role::Courier, &ListingFilters::default()).await;

        assert_eq!(outcome.status, ListingStatus::Failed);
        assert!(outcome.items.is_empty());
    }
}
