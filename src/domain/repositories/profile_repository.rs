//! Repository trait for courier and business profiles.

use crate::domain::entities::{Business, Courier, NewBusiness, NewCourier, Role};
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

/// Error returned when a user who already holds `role` registers again.
pub fn profile_exists(role: Role) -> AppError {
    AppError::conflict("Profile already exists", json!({ "role": role.as_str() }))
}

/// Repository interface for role profiles.
///
/// A user owns at most one profile across both tables. The `create_*`
/// methods check and insert as one atomic step, so concurrent registrations
/// for the same user cannot both succeed.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgProfileRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Returns the id of the user's courier profile, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn courier_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError>;

    /// Returns the id of the user's business profile, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn business_id_for_user(&self, user_id: Uuid) -> Result<Option<i64>, AppError>;

    /// Loads the user's full courier profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_courier(&self, user_id: Uuid) -> Result<Option<Courier>, AppError>;

    /// Loads the user's full business profile.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_business(&self, user_id: Uuid) -> Result<Option<Business>, AppError>;

    /// Inserts a courier profile unless the user already holds either profile.
    ///
    /// # Errors
    ///
    /// Returns [`profile_exists`] if the user already has a courier or
    /// business profile.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_courier(&self, user_id: Uuid, new: NewCourier) -> Result<Courier, AppError>;

    /// Inserts a business profile unless the user already holds either profile.
    ///
    /// # Errors
    ///
    /// Returns [`profile_exists`] if the user already has a courier or
    /// business profile.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_business(&self, user_id: Uuid, new: NewBusiness)
    -> Result<Business, AppError>;

    /// Replaces a courier's avatar URL. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_courier_avatar(&self, courier_id: i64, url: &str) -> Result<bool, AppError>;

    /// Replaces a business's avatar URL. Returns `false` if no row matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_business_avatar(&self, business_id: i64, url: &str) -> Result<bool, AppError>;

    /// Cheap round trip used by the health check.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the database is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
