//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{AuthService, ListingService, ProfileService, RoleService};
use crate::domain::repositories::{ListingRepository, ProfileRepository, SessionRepository};

/// Services shared across requests.
///
/// Cheap to clone: every field is an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub role_service: Arc<RoleService>,
    pub listing_service: Arc<ListingService>,
    pub profile_service: Arc<ProfileService>,
}

impl AppState {
    /// Wires all services on top of the given repositories.
    ///
    /// `listing_timeout` bounds each individual listing read.
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
        listings: Arc<dyn ListingRepository>,
        signing_secret: String,
        listing_timeout: Duration,
    ) -> Self {
        let role_service = Arc::new(RoleService::new(profiles.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(sessions, signing_secret)),
            listing_service: Arc::new(ListingService::with_timeout(listings, listing_timeout)),
            profile_service: Arc::new(ProfileService::new(profiles, role_service.clone())),
            role_service,
        }
    }
}
