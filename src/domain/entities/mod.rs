//! Core domain entities representing the marketplace data model.
//!
//! # Entity Types
//!
//! - [`Courier`] / [`CourierCard`] - A delivery worker's profile and its public projection
//! - [`Business`] - An employer's profile
//! - [`BusinessAd`] - A posting published by a business
//! - [`Listing`] - One entry of a role's listing
//! - [`Role`] - Which side of the marketplace a user is on
//!
//! Creation inputs use separate structs (`NewCourier`, `NewBusiness`),
//! following the same split as the stored entities.

pub mod attributes;
pub mod business;
pub mod business_ad;
pub mod courier;
pub mod listing;
pub mod role;

pub use attributes::{Gender, InvalidAttribute, LicenseType, WorkingHours, WorkingType};
pub use business::{Business, NewBusiness};
pub use business_ad::BusinessAd;
pub use courier::{Courier, CourierCard, NewCourier};
pub use listing::{
    COURIERS_UNAVAILABLE_MESSAGE, EMPTY_LISTING_MESSAGE, LISTING_FAILED_MESSAGE, LISTING_LIMIT,
    LISTING_PAGE_SIZE, Listing, ListingOutcome, ListingStatus,
};
pub use role::Role;
