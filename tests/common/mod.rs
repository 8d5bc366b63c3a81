#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use kurye_market::api::handlers::health_handler;
use kurye_market::api::routes::api_routes;
use kurye_market::domain::entities::{
    Business, BusinessAd, Courier, CourierCard, Gender, LicenseType, NewBusiness, NewCourier,
    Role, WorkingHours, WorkingType,
};
use kurye_market::domain::filters::{FilterKey, ListingQuery};
use kurye_market::domain::repositories::{
    CourierSource, ListingRepository, ProfileRepository, Session, SessionRepository,
    profile_exists,
};
use kurye_market::error::AppError;
use kurye_market::state::AppState;
use kurye_market::utils::token::hash_token;

pub const SIGNING_SECRET: &str = "test-signing-secret";

/// In-memory stand-in for the PostgreSQL backend.
#[derive(Default)]
pub struct MemoryBackend {
    pub couriers: Mutex<Vec<Courier>>,
    pub businesses: Mutex<Vec<Business>>,
    pub ads: Mutex<Vec<BusinessAd>>,
    pub sessions: Mutex<Vec<Session>>,
    /// Makes every read of `couriers_public` fail, as if the view were missing.
    pub public_view_broken: AtomicBool,
    /// Makes every listing read fail.
    pub listings_broken: AtomicBool,
    pub reads: Mutex<Vec<&'static str>>,
    next_id: AtomicI64,
    pings: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn unavailable(relation: &str) -> AppError {
        AppError::internal("Database error", json!({ "relation": relation }))
    }

    /// Stores a session for `user_id` and returns the raw token.
    pub fn issue_token(&self, user_id: Uuid) -> String {
        let token = format!("token-{user_id}");
        self.sessions.lock().unwrap().push(Session {
            id: self.next_id(),
            user_id,
            label: "test".to_string(),
            token_hash: hash_token(SIGNING_SECRET, &token),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        });
        token
    }

    pub fn revoke_all(&self) {
        for session in self.sessions.lock().unwrap().iter_mut() {
            session.revoked_at = Some(Utc::now());
        }
    }

    pub fn seed_courier(&self, user_id: Uuid, province: &str, age: Duration) -> i64 {
        let id = self.next_id();
        self.couriers.lock().unwrap().push(Courier {
            id,
            user_id,
            first_name: "Ali".to_string(),
            last_name: format!("Kurye{id}"),
            gender: Gender::Erkek,
            birth_year: 1995,
            nationality: "TC".to_string(),
            license_type: LicenseType::A2,
            phone: "+905321234567".to_string(),
            province: province.to_string(),
            district: "Merkez".to_string(),
            working_hours: WorkingHours::Gunduz,
            working_days: vec!["Pazartesi".to_string()],
            working_type: WorkingType::Tam,
            moto_model: "Honda PCX".to_string(),
            moto_cc: 125,
            avatar_url: None,
            created_at: Utc::now() - age,
        });
        id
    }

    pub fn seed_business(&self, user_id: Uuid) -> i64 {
        let id = self.next_id();
        self.businesses.lock().unwrap().push(Business {
            id,
            user_id,
            business_name: "Lezzet Dürüm".to_string(),
            manager_first_name: "Ayşe".to_string(),
            manager_last_name: "Kaya".to_string(),
            phone: "+905321234567".to_string(),
            address: "Bağdat Caddesi No: 12 Kadıköy".to_string(),
            working_type: WorkingType::Tam,
            working_hours: WorkingHours::Gunduz,
            avatar_url: None,
            created_at: Utc::now(),
        });
        id
    }

    pub fn seed_ad(
        &self,
        province: &str,
        working_type: WorkingType,
        created_at: DateTime<Utc>,
    ) -> i64 {
        let id = self.next_id();
        self.ads.lock().unwrap().push(BusinessAd {
            id,
            title: Some(format!("İlan {id}")),
            description: None,
            province: province.to_string(),
            district: "Merkez".to_string(),
            working_type,
            working_hours: WorkingHours::Gunduz,
            created_at,
        });
        id
    }

    pub fn reads(&self) -> Vec<&'static str> {
        self.reads.lock().unwrap().clone()
    }
}

fn newest_first_limited<T>(
    mut rows: Vec<T>,
    query: &ListingQuery,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    rows.sort_by_key(|r| std::cmp::Reverse(created_at(r)));
    rows.truncate(query.limit());
    rows
}

#[async_trait]
impl ListingRepository for MemoryBackend {
    async fn fetch_business_ads(&self, query: &ListingQuery) -> Result<Vec<BusinessAd>, AppError> {
        self.reads.lock().unwrap().push("business_ads");
        if self.listings_broken.load(Ordering::SeqCst) {
            return Err(Self::unavailable("business_ads"));
        }

        let rows: Vec<BusinessAd> = self
            .ads
            .lock()
            .unwrap()
            .iter()
            .filter(|ad| {
                query.matches(|key| match key {
                    FilterKey::Province => Some(ad.province.as_str()),
                    FilterKey::District => Some(ad.district.as_str()),
                    FilterKey::WorkingType => Some(ad.working_type.as_str()),
                    FilterKey::WorkingHours => Some(ad.working_hours.as_str()),
                    FilterKey::LicenseType => None,
                })
            })
            .cloned()
            .collect();

        Ok(newest_first_limited(rows, query, |ad| ad.created_at))
    }

    async fn fetch_couriers(
        &self,
        source: CourierSource,
        query: &ListingQuery,
    ) -> Result<Vec<CourierCard>, AppError> {
        let relation = source.collection().table();
        self.reads.lock().unwrap().push(relation);

        if self.listings_broken.load(Ordering::SeqCst)
            || (source == CourierSource::PublicView
                && self.public_view_broken.load(Ordering::SeqCst))
        {
            return Err(Self::unavailable(relation));
        }

        let rows: Vec<CourierCard> = self
            .couriers
            .lock()
            .unwrap()
            .iter()
            .filter(|c| {
                query.matches(|key| match key {
                    FilterKey::Province => Some(c.province.as_str()),
                    FilterKey::District => Some(c.district.as_str()),
                    FilterKey::WorkingType => Some(c.working_type.as_str()),
                    FilterKey::WorkingHours => Some(c.working_hours.as_str()),
                    FilterKey::LicenseType => Some(c.license_type.as_str()),
                })
            })
            .map(|c| CourierCard {
                id: c.id,
                first_name: Some(c.first_name.clone()),
                last_name: Some(c.last_name.clone()),
                avatar_url: c.avatar_url.clone(),
                phone: Some(c.phone.clone()),
                province: c.province.clone(),
                district: c.district.clone(),
                license_type: c.license_type,
                working_type: c.working_type,
                working_hours: c.working_hours,
                created_at: c.created_at,
            })
            .collect();

        Ok(newest_first_limited(rows, query, |c| c.created_at))
    }
}

/// Checks both tables while the caller holds both locks, couriers first.
fn held_role(couriers: &[Courier], businesses: &[Business], user_id: Uuid) -> Option<Role> {
    if couriers.iter().any(|c| c.user_id == user_id) {
        Some(Role::Courier)
    } else if businesses.iter().any(|b| b.user_id == user_id) {
        Some(Role::Business)
    } else {
        None
    }
}

#[async_trait]
impl ProfileRepository for MemoryBackend {
    async fn courier_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError> {
        tokio::task::yield_now().await;
        let couriers = self.couriers.lock().unwrap();
        Ok(couriers.iter().find(|c| c.user_id == user_id).map(|c| c.id))
    }

    async fn business_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError> {
        tokio::task::yield_now().await;
        let businesses = self.businesses.lock().unwrap();
        Ok(businesses
            .iter()
            .find(|b| b.user_id == user_id)
            .map(|b| b.id))
    }

    async fn find_courier(&self, user_id: Uuid) -> Result<Option<Courier>, AppError> {
        let couriers = self.couriers.lock().unwrap();
        Ok(couriers.iter().find(|c| c.user_id == user_id).cloned())
    }

    async fn find_business(&self, user_id: Uuid) -> Result<Option<Business>, AppError> {
        let businesses = self.businesses.lock().unwrap();
        Ok(businesses.iter().find(|b| b.user_id == user_id).cloned())
    }

    async fn create_courier(&self, user_id: Uuid, new: NewCourier) -> Result<Courier, AppError> {
        tokio::task::yield_now().await;
        let mut couriers = self.couriers.lock().unwrap();
        let businesses = self.businesses.lock().unwrap();
        if let Some(role) = held_role(&couriers, &businesses, user_id) {
            return Err(profile_exists(role));
        }

        let courier = Courier {
            id: self.next_id(),
            user_id,
            first_name: new.first_name,
            last_name: new.last_name,
            gender: new.gender,
            birth_year: new.birth_year,
            nationality: new.nationality,
            license_type: new.license_type,
            phone: new.phone,
            province: new.province,
            district: new.district,
            working_hours: new.working_hours,
            working_days: new.working_days,
            working_type: new.working_type,
            moto_model: new.moto_model,
            moto_cc: new.moto_cc,
            avatar_url: new.avatar_url,
            created_at: Utc::now(),
        };
        couriers.push(courier.clone());
        Ok(courier)
    }

    async fn create_business(
        &self,
        user_id: Uuid,
        new: NewBusiness,
    ) -> Result<Business, AppError> {
        tokio::task::yield_now().await;
        let couriers = self.couriers.lock().unwrap();
        let mut businesses = self.businesses.lock().unwrap();
        if let Some(role) = held_role(&couriers, &businesses, user_id) {
            return Err(profile_exists(role));
        }

        let business = Business {
            id: self.next_id(),
            user_id,
            business_name: new.business_name,
            manager_first_name: new.manager_first_name,
            manager_last_name: new.manager_last_name,
            phone: new.phone,
            address: new.address,
            working_type: new.working_type,
            working_hours: new.working_hours,
            avatar_url: new.avatar_url,
            created_at: Utc::now(),
        };
        businesses.push(business.clone());
        Ok(business)
    }

    async fn set_courier_avatar(&self, courier_id: i64, url: &str) -> Result<bool, AppError> {
        let mut couriers = self.couriers.lock().unwrap();
        Ok(match couriers.iter_mut().find(|c| c.id == courier_id) {
            Some(c) => {
                c.avatar_url = Some(url.to_string());
                true
            }
            None => false,
        })
    }

    async fn set_business_avatar(&self, business_id: i64, url: &str) -> Result<bool, AppError> {
        let mut businesses = self.businesses.lock().unwrap();
        Ok(match businesses.iter_mut().find(|b| b.id == business_id) {
            Some(b) => {
                b.avatar_url = Some(url.to_string());
                true
            }
            None => false,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.listings_broken.load(Ordering::SeqCst) {
            return Err(Self::unavailable("ping"));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionRepository for MemoryBackend {
    async fn find_user(&self, token_hash: &str) -> Result<Option<Uuid>, AppError> {
        let sessions = self.sessions.lock().unwrap();
        Ok(sessions
            .iter()
            .find(|s| s.token_hash == token_hash && s.is_active())
            .map(|s| s.user_id))
    }

    async fn touch(&self, token_hash: &str) -> Result<(), AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        if let Some(s) = sessions.iter_mut().find(|s| s.token_hash == token_hash) {
            s.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn create_session(
        &self,
        user_id: Uuid,
        label: &str,
        token_hash: &str,
    ) -> Result<Session, AppError> {
        let session = Session {
            id: self.next_id(),
            user_id,
            label: label.to_string(),
            token_hash: token_hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };
        self.sessions.lock().unwrap().push(session.clone());
        Ok(session)
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, AppError> {
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn revoke_session(&self, id: i64) -> Result<bool, AppError> {
        let mut sessions = self.sessions.lock().unwrap();
        Ok(match sessions.iter_mut().find(|s| s.id == id && s.is_active()) {
            Some(s) => {
                s.revoked_at = Some(Utc::now());
                true
            }
            None => false,
        })
    }
}

pub fn create_test_state(backend: &Arc<MemoryBackend>) -> AppState {
    AppState::new(
        backend.clone(),
        backend.clone(),
        backend.clone(),
        SIGNING_SECRET.to_string(),
        std::time::Duration::from_secs(5),
    )
}

/// `/health` plus all `/api` routes, without rate limiting.
pub fn create_test_server(backend: &Arc<MemoryBackend>) -> TestServer {
    let state = create_test_state(backend);
    let app = Router::new()
        .route("/health", axum::routing::get(health_handler))
        .nest("/api", api_routes(state.clone()))
        .with_state(state);

    TestServer::new(app).unwrap()
}
