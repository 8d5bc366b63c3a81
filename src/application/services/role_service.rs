//! Role classification for authenticated users.

use std::sync::Arc;

use crate::domain::entities::Role;
use crate::domain::repositories::ProfileRepository;
use crate::error::AppError;
use uuid::Uuid;

/// The profile a user owns, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileRef {
    Courier(i64),
    Business(i64),
    None,
}

impl ProfileRef {
    pub fn role(&self) -> Role {
        match self {
            ProfileRef::Courier(_) => Role::Courier,
            ProfileRef::Business(_) => Role::Business,
            ProfileRef::None => Role::Unknown,
        }
    }
}

/// Decides which side of the marketplace a user is on.
///
/// The courier table is always checked first and a hit ends the lookup, so a
/// user that somehow owns both profiles is a courier.
pub struct RoleService {
    repository: Arc<dyn ProfileRepository>,
}

impl RoleService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Finds the profile owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if either existence check fails.
    pub async fn locate(&self, user_id: Uuid) -> Result<ProfileRef, AppError> {
        if let Some(id) = self.repository.courier_id_for_user(user_id).await? {
            return Ok(ProfileRef::Courier(id));
        }

        if let Some(id) = self.repository.business_id_for_user(user_id).await? {
            return Ok(ProfileRef::Business(id));
        }

        Ok(ProfileRef::None)
    }

    /// Classifies an optional session user.
    ///
    /// No session yields [`Role::Unknown`] without touching the repository.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if an existence check fails.
    pub async fn classify(&self, user_id: Option<Uuid>) -> Result<Role, AppError> {
        let Some(user_id) = user_id else {
            return Ok(Role::Unknown);
        };

        let role = self.locate(user_id).await?.role();
        tracing::debug!(%user_id, role = role.as_str(), "classified user");
        Ok(role)
    }
}
