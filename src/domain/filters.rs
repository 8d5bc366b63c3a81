//! Listing filters and the query they produce for each role.
//!
//! Filters form a closed set of optional equality constraints. They are
//! parsed from untyped key/value pairs once, at the boundary, and carried as
//! [`ListingFilters`] from there on.

use serde_json::json;
use std::fmt;

use crate::domain::entities::{
    InvalidAttribute, LISTING_LIMIT, LicenseType, Role, WorkingHours, WorkingType,
};
use crate::error::AppError;

/// A filterable listing column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKey {
    Province,
    District,
    WorkingType,
    WorkingHours,
    LicenseType,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        FilterKey::Province,
        FilterKey::District,
        FilterKey::WorkingType,
        FilterKey::WorkingHours,
        FilterKey::LicenseType,
    ];

    /// Column name, identical in `business_ads`, `couriers` and `couriers_public`.
    pub fn column(&self) -> &'static str {
        match self {
            FilterKey::Province => "province",
            FilterKey::District => "district",
            FilterKey::WorkingType => "working_type",
            FilterKey::WorkingHours => "working_hours",
            FilterKey::LicenseType => "license_type",
        }
    }

    pub fn parse(key: &str) -> Result<Self, FilterError> {
        Self::ALL
            .into_iter()
            .find(|k| k.column() == key)
            .ok_or_else(|| FilterError::UnknownKey(key.to_string()))
    }

    /// Keys that constrain the listing browsed by `role`, in application order.
    pub fn for_role(role: Role) -> &'static [FilterKey] {
        match role {
            Role::Courier => &[
                FilterKey::Province,
                FilterKey::District,
                FilterKey::WorkingType,
                FilterKey::WorkingHours,
            ],
            Role::Business => &[
                FilterKey::Province,
                FilterKey::District,
                FilterKey::LicenseType,
                FilterKey::WorkingType,
                FilterKey::WorkingHours,
            ],
            Role::Unknown => &[],
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown filter '{0}'")]
    UnknownKey(String),
    #[error(transparent)]
    InvalidValue(#[from] InvalidAttribute),
}

impl From<FilterError> for AppError {
    fn from(e: FilterError) -> Self {
        let details = match &e {
            FilterError::UnknownKey(key) => json!({ "filter": key }),
            FilterError::InvalidValue(attr) => json!({ "filter": attr.kind, "value": attr.value }),
        };
        AppError::bad_request(e.to_string(), details)
    }
}

/// User-selected listing filters. Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListingFilters {
    pub province: Option<String>,
    pub district: Option<String>,
    pub working_type: Option<WorkingType>,
    pub working_hours: Option<WorkingHours>,
    pub license_type: Option<LicenseType>,
}

impl ListingFilters {
    /// Builds filters from raw key/value pairs.
    ///
    /// Blank values are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownKey`] for keys outside [`FilterKey::ALL`] and
    /// [`FilterError::InvalidValue`] for values outside an enumerated set.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        for (key, value) in pairs {
            filters.set(FilterKey::parse(key.as_ref())?, value.as_ref())?;
        }
        Ok(filters)
    }

    /// Sets one filter; a blank value clears it.
    pub fn set(&mut self, key: FilterKey, value: &str) -> Result<(), FilterError> {
        let value = value.trim();
        if value.is_empty() {
            self.clear(key);
            return Ok(());
        }

        match key {
            FilterKey::Province => self.province = Some(value.to_string()),
            FilterKey::District => self.district = Some(value.to_string()),
            FilterKey::WorkingType => self.working_type = Some(value.parse()?),
            FilterKey::WorkingHours => self.working_hours = Some(value.parse()?),
            FilterKey::LicenseType => self.license_type = Some(value.parse()?),
        }
        Ok(())
    }

    pub fn clear(&mut self, key: FilterKey) {
        match key {
            FilterKey::Province => self.province = None,
            FilterKey::District => self.district = None,
            FilterKey::WorkingType => self.working_type = None,
            FilterKey::WorkingHours => self.working_hours = None,
            FilterKey::LicenseType => self.license_type = None,
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        match key {
            FilterKey::Province => self.province.as_deref(),
            FilterKey::District => self.district.as_deref(),
            FilterKey::WorkingType => self.working_type.as_ref().map(WorkingType::as_str),
            FilterKey::WorkingHours => self.working_hours.as_ref().map(WorkingHours::as_str),
            FilterKey::LicenseType => self.license_type.as_ref().map(LicenseType::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterKey::ALL.iter().all(|k| self.get(*k).is_none())
    }

    /// Query for the listing browsed by `role`.
    ///
    /// Only the keys meaningful for that role are kept, so `license_type`
    /// never constrains business ads. Returns `None` for [`Role::Unknown`].
    pub fn query_for(&self, role: Role) -> Option<ListingQuery> {
        if !role.is_known() {
            return None;
        }

        let conditions = FilterKey::for_role(role)
            .iter()
            .filter_map(|key| {
                self.get(*key).map(|value| Condition {
                    key: *key,
                    value: value.to_string(),
                })
            })
            .collect();

        Some(ListingQuery {
            conditions,
            limit: LISTING_LIMIT,
        })
    }
}

/// A single `column = value` constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub key: FilterKey,
    pub value: String,
}

/// Equality conditions, newest-first ordering and a row cap.
///
/// The same value is handed to the primary and the fallback read, so both
/// see the identical filter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    conditions: Vec<Condition>,
    limit: usize,
}

impl ListingQuery {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// True when every condition holds for the given column lookup.
    pub fn matches<'a>(&self, lookup: impl Fn(FilterKey) -> Option<&'a str>) -> bool {
        self.conditions
            .iter()
            .all(|c| lookup(c.key) == Some(c.value.as_str()))
    }
}
