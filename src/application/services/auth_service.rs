//! Session authentication for bearer tokens.

use std::sync::Arc;

use crate::domain::repositories::SessionRepository;
use crate::error::AppError;
use crate::utils::token::hash_token;
use serde_json::json;
use uuid::Uuid;

/// Resolves bearer tokens to the user that owns the session.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// lookup, so the session store never sees raw tokens.
pub struct AuthService {
    repository: Arc<dyn SessionRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// `signing_secret` must match the value used when sessions were issued.
    pub fn new(repository: Arc<dyn SessionRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token the same way the session store does.
    pub fn hash(&self, token: &str) -> String {
        hash_token(&self.signing_secret, token)
    }

    /// Returns the user id behind a raw bearer token.
    ///
    /// A successful lookup also refreshes `last_used_at`; failures of that
    /// update are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Uuid, AppError> {
        let token_hash = self.hash(token);

        let user_id = self
            .repository
            .find_user(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
            })?;

        if let Err(e) = self.repository.touch(&token_hash).await {
            tracing::warn!(error = %e, "failed to update session last_used_at");
        }

        Ok(user_id)
    }
}
