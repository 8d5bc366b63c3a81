//! DTOs for profile registration and avatar updates.

use chrono::{Datelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::Profile;
use crate::domain::entities::{
    Gender, LicenseType, NewBusiness, NewCourier, Role, WorkingHours, WorkingType,
};
use crate::error::AppError;

/// Turkish mobile number in international form.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+90\d{10}$").unwrap());

/// Youngest accepted courier age in years.
const MIN_COURIER_AGE: i32 = 18;
/// Oldest accepted courier age in years.
const MAX_COURIER_AGE: i32 = 80;

/// Checks that a courier born in `year` is between 18 and 80 in `current_year`.
pub fn check_birth_year(year: i32, current_year: i32) -> Result<(), AppError> {
    let oldest = current_year - MAX_COURIER_AGE;
    let youngest = current_year - MIN_COURIER_AGE;

    if (oldest..=youngest).contains(&year) {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Validation failed",
            json!({ "birth_year": [format!("Doğum yılı {oldest} ile {youngest} arasında olmalı")] }),
        ))
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Request to register a courier profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCourierRequest {
    #[validate(length(min = 2, message = "En az 2 karakter"))]
    pub first_name: String,

    #[validate(length(min = 2, message = "En az 2 karakter"))]
    pub last_name: String,

    pub gender: Gender,

    pub birth_year: i32,

    #[validate(length(min = 1, message = "Uyruk gerekli"))]
    pub nationality: String,

    pub license_type: LicenseType,

    #[validate(regex(path = *PHONE_REGEX, message = "+90 ile başlayan 10 haneli numara"))]
    pub phone: String,

    #[validate(length(min = 1, message = "İl seçin"))]
    pub province: String,

    #[validate(length(min = 1, message = "İlçe seçin"))]
    pub district: String,

    pub working_hours: WorkingHours,

    #[validate(length(min = 1, message = "En az bir gün seçin"))]
    pub working_days: Vec<String>,

    pub working_type: WorkingType,

    #[validate(length(min = 2, message = "Motor modeli gerekli"))]
    pub moto_model: String,

    #[validate(range(min = 1, message = "Motor hacmi 0'dan büyük olmalı"))]
    pub moto_cc: i32,

    #[validate(url(message = "Invalid URL format"))]
    pub avatar_url: Option<String>,
}

impl RegisterCourierRequest {
    /// Validates the request and converts it into a domain value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    /// Surrounding whitespace is stripped from text fields before validation.
    pub fn into_new_courier(mut self) -> Result<NewCourier, AppError> {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.nationality,
            &mut self.province,
            &mut self.district,
            &mut self.moto_model,
        ] {
            trim_in_place(field);
        }
        self.validate()?;
        check_birth_year(self.birth_year, Utc::now().year())?;

        Ok(NewCourier {
            first_name: self.first_name,
            last_name: self.last_name,
            gender: self.gender,
            birth_year: self.birth_year,
            nationality: self.nationality,
            license_type: self.license_type,
            phone: self.phone,
            province: self.province,
            district: self.district,
            working_hours: self.working_hours,
            working_days: self.working_days,
            working_type: self.working_type,
            moto_model: self.moto_model,
            moto_cc: self.moto_cc,
            avatar_url: self.avatar_url,
        })
    }
}

/// Request to register a business profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterBusinessRequest {
    #[validate(length(min = 2, message = "En az 2 karakter"))]
    pub business_name: String,

    #[validate(length(min = 2, message = "En az 2 karakter"))]
    pub manager_first_name: String,

    #[validate(length(min = 2, message = "En az 2 karakter"))]
    pub manager_last_name: String,

    #[validate(regex(path = *PHONE_REGEX, message = "+90 ile başlayan 10 haneli numara"))]
    pub phone: String,

    #[validate(length(min = 10, message = "Adres en az 10 karakter"))]
    pub address: String,

    pub working_type: WorkingType,

    pub working_hours: WorkingHours,

    #[validate(url(message = "Invalid URL format"))]
    pub avatar_url: Option<String>,
}

impl RegisterBusinessRequest {
    /// Validates the request and converts it into a domain value.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] with per-field messages.
    /// Surrounding whitespace is stripped from text fields before validation.
    pub fn into_new_business(mut self) -> Result<NewBusiness, AppError> {
        for field in [
            &mut self.business_name,
            &mut self.manager_first_name,
            &mut self.manager_last_name,
            &mut self.address,
        ] {
            trim_in_place(field);
        }
        self.validate()?;

        Ok(NewBusiness {
            business_name: self.business_name,
            manager_first_name: self.manager_first_name,
            manager_last_name: self.manager_last_name,
            phone: self.phone,
            address: self.address,
            working_type: self.working_type,
            working_hours: self.working_hours,
            avatar_url: self.avatar_url,
        })
    }
}

/// Request to replace the caller's avatar URL.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAvatarRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub avatar_url: String,
}

/// The caller's profile with its role.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub role: Role,
    pub display_name: String,
    pub profile: Profile,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            role: profile.role(),
            display_name: profile.display_name(),
            profile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn courier_request() -> RegisterCourierRequest {
        serde_json::from_value(json!({
            "first_name": "Ali",
            "last_name": "Yılmaz",
            "gender": "erkek",
            "birth_year": Utc::now().year() - 30,
            "nationality": "TC",
            "license_type": "A2",
            "phone": "+905321234567",
            "province": "İstanbul",
            "district": "Kadıköy",
            "working_hours": "gunduz",
            "working_days": ["Pazartesi", "Salı"],
            "working_type": "tam",
            "moto_model": "Honda PCX",
            "moto_cc": 125
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_courier_request_converts() {
        let new = courier_request().into_new_courier().unwrap();
        assert_eq!(new.first_name, "Ali");
        assert_eq!(new.license_type, LicenseType::A2);
        assert_eq!(new.working_days.len(), 2);
    }

    #[test]
    fn test_phone_must_be_turkish_mobile() {
        let mut req = courier_request();
        req.phone = "05321234567".to_string();

        let err = req.into_new_courier().unwrap_err();
        match err {
            AppError::Validation { details, .. } => assert!(details.get("phone").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_names_are_validated_after_trimming() {
        let mut req = courier_request();
        req.first_name = " a ".to_string();

        match req.into_new_courier().unwrap_err() {
            AppError::Validation { details, .. } => assert!(details.get("first_name").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }

        let mut req = courier_request();
        req.last_name = "  Yılmaz  ".to_string();
        req.district = " Kadıköy".to_string();

        let new = req.into_new_courier().unwrap();
        assert_eq!(new.last_name, "Yılmaz");
        assert_eq!(new.district, "Kadıköy");
    }

    #[test]
    fn test_working_days_required() {
        let mut req = courier_request();
        req.working_days.clear();
        assert!(req.into_new_courier().is_err());
    }

    #[test]
    fn test_moto_cc_must_be_positive() {
        let mut req = courier_request();
        req.moto_cc = 0;
        assert!(req.into_new_courier().is_err());
    }

    #[test]
    fn test_birth_year_bounds() {
        assert!(check_birth_year(2008, 2026).is_ok());
        assert!(check_birth_year(1946, 2026).is_ok());
        assert!(check_birth_year(2009, 2026).is_err());
        assert!(check_birth_year(1945, 2026).is_err());
    }

    #[test]
    fn test_business_address_minimum_length() {
        let req: RegisterBusinessRequest = serde_json::from_value(json!({
            "business_name": "Lezzet Dürüm",
            "manager_first_name": "Ayşe",
            "manager_last_name": "Kaya",
            "phone": "+905321234567",
            "address": "Kısa",
            "working_type": "yari",
            "working_hours": "24"
        }))
        .unwrap();

        match req.into_new_business().unwrap_err() {
            AppError::Validation { details, .. } => assert!(details.get("address").is_some()),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_business_padded_short_name_rejected() {
        let req: RegisterBusinessRequest = serde_json::from_value(json!({
            "business_name": "  X  ",
            "manager_first_name": " Ayşe ",
            "manager_last_name": "Kaya",
            "phone": "+905321234567",
            "address": "Bağdat Caddesi No: 12",
            "working_type": "yari",
            "working_hours": "24"
        }))
        .unwrap();

        match req.into_new_business().unwrap_err() {
            AppError::Validation { details, .. } => {
                assert!(details.get("business_name").is_some());
                assert!(details.get("manager_first_name").is_none());
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_enum_code_is_rejected_on_deserialize() {
        let result = serde_json::from_value::<RegisterBusinessRequest>(json!({
            "business_name": "Lezzet Dürüm",
            "manager_first_name": "Ayşe",
            "manager_last_name": "Kaya",
            "phone": "+905321234567",
            "address": "Bağdat Caddesi No: 12",
            "working_type": "full-time",
            "working_hours": "24"
        }));
        assert!(result.is_err());
    }
}
