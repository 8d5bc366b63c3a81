//! Job posting published by a business.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::attributes::{WorkingHours, WorkingType};

/// A posting visible to couriers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusinessAd {
    pub id: i64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub province: String,
    pub district: String,
    pub working_type: WorkingType,
    pub working_hours: WorkingHours,
    pub created_at: DateTime<Utc>,
}

impl BusinessAd {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Başlık")
    }
}
