//! Listing records and the result of one listing fetch.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BusinessAd, CourierCard};

/// Upper bound on records returned by a single listing fetch.
pub const LISTING_LIMIT: usize = 60;

/// Records shown on one listings page.
pub const LISTING_PAGE_SIZE: usize = 6;

/// Message shown when the courier listing cannot be read from either source.
pub const COURIERS_UNAVAILABLE_MESSAGE: &str = "Kuryeler şu anda listelenemiyor. Yönetici tarafında 'couriers_public' görüntüsü veya RLS ayarı gerekebilir.";

/// Message shown when any other listing read fails.
pub const LISTING_FAILED_MESSAGE: &str = "İlanlar şu anda yüklenemiyor. Lütfen daha sonra tekrar deneyin.";

/// Message shown when a listing is empty because there is nothing to show.
pub const EMPTY_LISTING_MESSAGE: &str = "Henüz kayıt yok.";

/// One entry of the opposite role's listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Listing {
    Ad(BusinessAd),
    Courier(CourierCard),
}

impl Listing {
    pub fn id(&self) -> i64 {
        match self {
            Listing::Ad(ad) => ad.id,
            Listing::Courier(card) => card.id,
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        match self {
            Listing::Ad(ad) => ad.created_at,
            Listing::Courier(card) => card.created_at,
        }
    }

    pub fn title(&self) -> String {
        match self {
            Listing::Ad(ad) => ad.display_title().to_string(),
            Listing::Courier(card) => card.display_name(),
        }
    }

    pub fn province(&self) -> &str {
        match self {
            Listing::Ad(ad) => &ad.province,
            Listing::Courier(card) => &card.province,
        }
    }

    pub fn district(&self) -> &str {
        match self {
            Listing::Ad(ad) => &ad.district,
            Listing::Courier(card) => &card.district,
        }
    }
}

/// How a listing fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    /// Rows were read; the listing may still be empty.
    #[default]
    Ready,
    /// Neither the courier projection nor the base table could be read.
    Unavailable,
    /// The business ad read failed.
    Failed,
}

/// Items of one fetch plus how it ended.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListingOutcome {
    pub items: Vec<Listing>,
    pub status: ListingStatus,
}

impl ListingOutcome {
    pub fn ready(items: Vec<Listing>) -> Self {
        Self {
            items,
            status: ListingStatus::Ready,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn failed(status: ListingStatus) -> Self {
        Self {
            items: Vec::new(),
            status,
        }
    }

    /// User-facing reason for an empty result caused by a failure.
    ///
    /// `None` when the fetch succeeded, even if it found nothing.
    pub fn message(&self) -> Option<&'static str> {
        match self.status {
            ListingStatus::Ready => None,
            ListingStatus::Unavailable => Some(COURIERS_UNAVAILABLE_MESSAGE),
            ListingStatus::Failed => Some(LISTING_FAILED_MESSAGE),
        }
    }
}
