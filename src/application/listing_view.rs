//! Page-level state of a listings screen.
//!
//! [`ListingView`] owns the role, the filters, the fetched items and the
//! current page of one listings screen. It changes only through its
//! transitions. Every role or filter change issues a new [`FetchTicket`];
//! an outcome is applied only with the most recent ticket, so a slow
//! earlier fetch can never overwrite a newer one.

use crate::application::services::ListingService;
use crate::domain::entities::{
    EMPTY_LISTING_MESSAGE, LISTING_PAGE_SIZE, Listing, ListingOutcome, Role,
};
use crate::domain::filters::ListingFilters;
use crate::domain::pagination::{page_slice, total_pages};

/// Identifies one fetch request issued by a [`ListingView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone)]
pub struct ListingView {
    role: Role,
    filters: ListingFilters,
    items: Vec<Listing>,
    page: usize,
    page_size: usize,
    loading: bool,
    message: Option<&'static str>,
    generation: u64,
}

impl Default for ListingView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingView {
    /// A view waiting for its role, showing the loading state.
    pub fn new() -> Self {
        Self {
            role: Role::Unknown,
            filters: ListingFilters::default(),
            items: Vec::new(),
            page: 1,
            page_size: LISTING_PAGE_SIZE,
            loading: true,
            message: None,
            generation: 0,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn filters(&self) -> &ListingFilters {
        &self.filters
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Failure message of the last applied fetch.
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn title(&self) -> &'static str {
        self.role.listing_title()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.items.len(), self.page_size)
    }

    /// Records of the current page.
    pub fn paged(&self) -> &[Listing] {
        page_slice(&self.items, self.page, self.page_size)
    }

    /// Text for an empty, settled screen: the failure message if the last
    /// fetch failed, the neutral "no records" text otherwise.
    pub fn empty_state_message(&self) -> Option<&'static str> {
        if self.loading || !self.paged().is_empty() {
            return None;
        }
        Some(self.message.unwrap_or(EMPTY_LISTING_MESSAGE))
    }

    fn begin_fetch(&mut self) -> Option<FetchTicket> {
        self.generation += 1;
        if !self.role.is_known() {
            self.loading = false;
            return None;
        }
        self.loading = true;
        self.message = None;
        Some(FetchTicket(self.generation))
    }

    /// Sets the role. Returns the ticket for the fetch this change requires,
    /// or `None` when the role is unknown and nothing is to be fetched.
    pub fn set_role(&mut self, role: Role) -> Option<FetchTicket> {
        self.role = role;
        if !role.is_known() {
            self.items.clear();
            self.message = None;
            self.page = 1;
        }
        self.begin_fetch()
    }

    /// Replaces the filters. Returns the ticket for the required fetch.
    pub fn set_filters(&mut self, filters: ListingFilters) -> Option<FetchTicket> {
        self.filters = filters;
        self.begin_fetch()
    }

    /// Applies a fetch outcome if `ticket` is still the latest request.
    ///
    /// Resets the page to 1. Returns `false` and leaves the view untouched
    /// for a superseded ticket.
    pub fn set_items(&mut self, ticket: FetchTicket, outcome: ListingOutcome) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(
                stale = ticket.0,
                current = self.generation,
                "dropping superseded listing outcome"
            );
            return false;
        }

        self.message = outcome.message();
        self.items = outcome.items;
        self.page = 1;
        self.loading = false;
        true
    }

    /// Moves to `page`, clamped to the available pages (at least 1).
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// Fetches for the current role and filters and applies the outcome.
    ///
    /// Returns whether an outcome was applied. Does nothing for an unknown
    /// role.
    pub async fn refresh(&mut self, service: &ListingService) -> bool {
        let Some(ticket) = self.begin_fetch() else {
            return false;
        };
        let outcome = service.resolve(self.role, &self.filters).await;
        self.set_items(ticket, outcome)
    }
}
