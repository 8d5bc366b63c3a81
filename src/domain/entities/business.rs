//! Business profile entities.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::attributes::{WorkingHours, WorkingType};

/// An employer's profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Business {
    pub id: i64,
    pub user_id: Uuid,
    pub business_name: String,
    pub manager_first_name: String,
    pub manager_last_name: String,
    pub phone: String,
    pub address: String,
    pub working_type: WorkingType,
    pub working_hours: WorkingHours,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Business {
    pub fn display_name(&self) -> &str {
        if self.business_name.trim().is_empty() {
            "İşletme"
        } else {
            &self.business_name
        }
    }
}

/// Input data for registering a business profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBusiness {
    pub business_name: String,
    pub manager_first_name: String,
    pub manager_last_name: String,
    pub phone: String,
    pub address: String,
    pub working_type: WorkingType,
    pub working_hours: WorkingHours,
    pub avatar_url: Option<String>,
}
