//! Courier profile entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::attributes::{Gender, LicenseType, WorkingHours, WorkingType};

/// A courier's full profile, as owned by the courier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Courier {
    pub id: i64,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub nationality: String,
    pub license_type: LicenseType,
    pub phone: String,
    pub province: String,
    pub district: String,
    pub working_hours: WorkingHours,
    pub working_days: Vec<String>,
    pub working_type: WorkingType,
    pub moto_model: String,
    pub moto_cc: i32,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Courier {
    /// Display name, falling back to "Kurye" when both names are blank.
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// Input data for registering a courier profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourier {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birth_year: i32,
    pub nationality: String,
    pub license_type: LicenseType,
    pub phone: String,
    pub province: String,
    pub district: String,
    pub working_hours: WorkingHours,
    pub working_days: Vec<String>,
    pub working_type: WorkingType,
    pub moto_model: String,
    pub moto_cc: i32,
    pub avatar_url: Option<String>,
}

/// The part of a courier profile visible to businesses.
///
/// Rows come from the `couriers_public` projection, or from `couriers`
/// when the projection is unreachable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CourierCard {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub province: String,
    pub district: String,
    pub license_type: LicenseType,
    pub working_type: WorkingType,
    pub working_hours: WorkingHours,
    pub created_at: DateTime<Utc>,
}

impl CourierCard {
    pub fn display_name(&self) -> String {
        display_name(
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
        )
    }
}

fn display_name(first: &str, last: &str) -> String {
    let name = format!("{first} {last}");
    let name = name.trim();
    if name.is_empty() {
        "Kurye".to_string()
    } else {
        name.to_string()
    }
}
