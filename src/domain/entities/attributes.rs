//! Closed value sets shared by courier, business and ad records.
//!
//! Wire and storage values are the lowercase Turkish codes used by the
//! registration forms (`tam`, `gunduz`, `A2`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when a string is not one of the allowed codes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} value '{value}'")]
pub struct InvalidAttribute {
    pub kind: &'static str,
    pub value: String,
}

/// Employment arrangement: full time, part time or freelance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkingType {
    Tam,
    Yari,
    Serbest,
}

impl WorkingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkingType::Tam => "tam",
            WorkingType::Yari => "yari",
            WorkingType::Serbest => "serbest",
        }
    }
}

impl FromStr for WorkingType {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tam" => Ok(WorkingType::Tam),
            "yari" => Ok(WorkingType::Yari),
            "serbest" => Ok(WorkingType::Serbest),
            other => Err(InvalidAttribute {
                kind: "working_type",
                value: other.to_string(),
            }),
        }
    }
}

/// Shift: daytime, night, or around the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkingHours {
    #[serde(rename = "gunduz")]
    Gunduz,
    #[serde(rename = "gece")]
    Gece,
    #[serde(rename = "24")]
    AllDay,
}

impl WorkingHours {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkingHours::Gunduz => "gunduz",
            WorkingHours::Gece => "gece",
            WorkingHours::AllDay => "24",
        }
    }
}

impl FromStr for WorkingHours {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gunduz" => Ok(WorkingHours::Gunduz),
            "gece" => Ok(WorkingHours::Gece),
            "24" => Ok(WorkingHours::AllDay),
            other => Err(InvalidAttribute {
                kind: "working_hours",
                value: other.to_string(),
            }),
        }
    }
}

/// Motorcycle licence class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseType {
    A1,
    A2,
    A,
}

impl LicenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseType::A1 => "A1",
            LicenseType::A2 => "A2",
            LicenseType::A => "A",
        }
    }
}

impl FromStr for LicenseType {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A1" => Ok(LicenseType::A1),
            "A2" => Ok(LicenseType::A2),
            "A" => Ok(LicenseType::A),
            other => Err(InvalidAttribute {
                kind: "license_type",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Erkek,
    Kadin,
    Diger,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Erkek => "erkek",
            Gender::Kadin => "kadin",
            Gender::Diger => "diger",
        }
    }
}

impl FromStr for Gender {
    type Err = InvalidAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "erkek" => Ok(Gender::Erkek),
            "kadin" => Ok(Gender::Kadin),
            "diger" => Ok(Gender::Diger),
            other => Err(InvalidAttribute {
                kind: "gender",
                value: other.to_string(),
            }),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(WorkingType, WorkingHours, LicenseType, Gender);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_working_hours_codes() {
        assert_eq!("24".parse::<WorkingHours>().unwrap(), WorkingHours::AllDay);
        assert_eq!(WorkingHours::AllDay.as_str(), "24");
        assert_eq!(
            serde_json::to_string(&WorkingHours::AllDay).unwrap(),
            "\"24\""
        );
    }

    #[test]
    fn test_license_type_is_case_sensitive() {
        assert_eq!("A2".parse::<LicenseType>().unwrap(), LicenseType::A2);
        let err = "a2".parse::<LicenseType>().unwrap_err();
        assert_eq!(err.kind, "license_type");
        assert_eq!(err.value, "a2");
    }

    #[test]
    fn test_working_type_rejects_unknown() {
        assert!("part-time".parse::<WorkingType>().is_err());
        assert_eq!(WorkingType::Serbest.to_string(), "serbest");
    }

    #[test]
    fn test_gender_deserializes_lowercase() {
        let g: Gender = serde_json::from_str("\"kadin\"").unwrap();
        assert_eq!(g, Gender::Kadin);
    }
}
