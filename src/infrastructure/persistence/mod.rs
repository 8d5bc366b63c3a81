//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime; listing reads are assembled with
//! [`sqlx::QueryBuilder`] because their filter set varies per request.
//!
//! # Repositories
//!
//! - [`PgListingRepository`] - Business ad and courier card reads
//! - [`PgProfileRepository`] - Courier and business profiles
//! - [`PgSessionRepository`] - Bearer session storage and validation

pub mod pg_listing_repository;
pub mod pg_profile_repository;
pub mod pg_session_repository;

pub use pg_listing_repository::PgListingRepository;
pub use pg_profile_repository::PgProfileRepository;
pub use pg_session_repository::PgSessionRepository;

use serde_json::json;

use crate::domain::entities::InvalidAttribute;
use crate::error::AppError;

/// A stored row holding a code outside its enumerated set.
fn corrupt_row(e: InvalidAttribute) -> AppError {
    tracing::error!(kind = e.kind, value = %e.value, "unreadable row");
    AppError::internal("Stored record is invalid", json!({ "field": e.kind }))
}
