//! Business logic services for the application layer.

pub mod auth_service;
pub mod listing_service;
pub mod profile_service;
pub mod role_service;

pub use auth_service::AuthService;
pub use listing_service::{FetchState, ListingService};
pub use profile_service::{Profile, ProfileService};
pub use role_service::{ProfileRef, RoleService};
