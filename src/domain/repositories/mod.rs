//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the backend platform (PostgreSQL in production).
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`ListingRepository`] - Cross-role listing reads
//! - [`ProfileRepository`] - Courier and business profiles
//! - [`SessionRepository`] - Bearer session lookup and management

pub mod listing_repository;
pub mod profile_repository;
pub mod session_repository;

pub use listing_repository::{Collection, CourierSource, ListingRepository};
pub use profile_repository::{ProfileRepository, profile_exists};
pub use session_repository::{Session, SessionRepository};

#[cfg(test)]
pub use listing_repository::MockListingRepository;
#[cfg(test)]
pub use profile_repository::MockProfileRepository;
#[cfg(test)]
pub use session_repository::MockSessionRepository;
