//! Domain layer containing marketplace entities and data access contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Profiles, ads, listing records and roles
//! - [`filters`] - Listing filters and the query they produce per role
//! - [`pagination`] - Fixed-size page slicing of a fetched listing
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers. Services in [`crate::application::services`] orchestrate it.

pub mod entities;
pub mod filters;
pub mod pagination;
pub mod repositories;
