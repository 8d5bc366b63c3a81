//! Application layer services implementing marketplace logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and
//! provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Bearer session lookup
//! - [`services::role_service::RoleService`] - Courier / business classification
//! - [`services::listing_service::ListingService`] - Listing resolution with fallback
//! - [`services::profile_service::ProfileService`] - Registration and avatar updates
//!
//! [`listing_view::ListingView`] is the state object a listings screen owns.

pub mod listing_view;
pub mod services;
