//! Profile registration, lookup and avatar updates.

use std::sync::Arc;

use crate::application::services::role_service::{ProfileRef, RoleService};
use crate::domain::entities::{Business, Courier, NewBusiness, NewCourier, Role};
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use serde::Serialize;
use serde_json::json;
use url::Url;
use uuid::Uuid;

/// A user's profile, whichever side they registered on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Profile {
    Courier(Courier),
    Business(Business),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Courier(_) => Role::Courier,
            Profile::Business(_) => Role::Business,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Profile::Courier(c) => c.display_name(),
            Profile::Business(b) => b.display_name().to_string(),
        }
    }
}

/// Manages the profile each user completes after signing up.
///
/// Registration is refused once the user holds either role; avatar files
/// are uploaded elsewhere and only their public URL reaches this service.
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    roles: Arc<RoleService>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>, roles: Arc<RoleService>) -> Self {
        Self { repository, roles }
    }

    /// Registers a courier profile for `user_id`.
    ///
    /// The repository checks for an existing profile and inserts atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_courier(
        &self,
        user_id: Uuid,
        new: NewCourier,
    ) -> Result<Courier, AppError> {
        let courier = self.repository.create_courier(user_id, new).await?;
        tracing::info!(%user_id, courier_id = courier.id, "courier registered");
        Ok(courier)
    }

    /// Registers a business profile for `user_id`.
    ///
    /// The repository checks for an existing profile and inserts atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn register_business(
        &self,
        user_id: Uuid,
        new: NewBusiness,
    ) -> Result<Business, AppError> {
        let business = self.repository.create_business(user_id, new).await?;
        tracing::info!(%user_id, business_id = business.id, "business registered");
        Ok(business)
    }

    /// Loads the user's profile, courier first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_profile(&self, user_id: Uuid) -> Result<Profile, AppError> {
        if let Some(courier) = self.repository.find_courier(user_id).await? {
            return Ok(Profile::Courier(courier));
        }
        if let Some(business) = self.repository.find_business(user_id).await? {
            return Ok(Profile::Business(business));
        }
        Err(AppError::not_found("Profile not found", json!({})))
    }

    /// Points the user's profile at a new avatar URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless `url` is an absolute http(s) URL.
    /// Returns [`AppError::NotFound`] if the user has no profile.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_avatar(&self, user_id: Uuid, url: &str) -> Result<Profile, AppError> {
        validate_avatar_url(url)?;

        let updated = match self.roles.locate(user_id).await? {
            ProfileRef::Courier(id) => self.repository.set_courier_avatar(id, url).await?,
            ProfileRef::Business(id) => self.repository.set_business_avatar(id, url).await?,
            ProfileRef::None => false,
        };

        if !updated {
            return Err(AppError::not_found("Profile not found", json!({})));
        }

        self.get_profile(user_id).await
    }

    /// Checks that the profile store answers.
    pub async fn check_backend(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

/// Accepts only absolute `http` or `https` URLs.
pub fn validate_avatar_url(raw: &str) -> Result<(), AppError> {
    let valid = Url::parse(raw)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host().is_some())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Avatar URL must be an http(s) URL",
            json!({ "avatar_url": raw }),
        ))
    }
}
