//! Repository trait for session token lookup.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A bearer session issued to a user.
///
/// Only the HMAC hash of the raw token is stored.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: i64,
    pub user_id: Uuid,
    pub label: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.revoked_at.is_none()
    }
}

/// Repository interface for the session store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgSessionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Resolves an active session's user.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user_id))` if the hash belongs to a non-revoked session
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_user(&self, token_hash: &str) -> Result<Option<Uuid>, AppError>;

    /// Updates the `last_used_at` timestamp of a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_session(
        &self,
        user_id: Uuid,
        label: &str,
        token_hash: &str,
    ) -> Result<Session, AppError>;

    /// Lists all sessions, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_sessions(&self) -> Result<Vec<Session>, AppError>;

    /// Revokes a session. Returns `false` if it was missing or already revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn revoke_session(&self, id: i64) -> Result<bool, AppError>;
}
