//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod listings;
pub mod profile;

pub use health::health_handler;
pub use listings::listings_handler;
pub use profile::{
    get_profile_handler, register_business_handler, register_courier_handler,
    update_avatar_handler,
};
