//! Marketplace role of an authenticated user.

use serde::Serialize;

/// Which side of the marketplace a user is on.
///
/// Determined by [`crate::application::services::RoleService::classify`].
/// `Unknown` covers both "no session" and "session without a profile".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Role {
    #[serde(rename = "kurye")]
    Courier,
    #[serde(rename = "isletme")]
    Business,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Courier => "kurye",
            Role::Business => "isletme",
            Role::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Role::Unknown)
    }

    /// Heading shown above the listings this role browses.
    pub fn listing_title(&self) -> &'static str {
        match self {
            Role::Courier => "İŞLETME İLANLARI",
            Role::Business => "KURYELER",
            Role::Unknown => "İLANLAR",
        }
    }
}
