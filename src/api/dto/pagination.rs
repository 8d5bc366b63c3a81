//! Pagination metadata shared by list responses.

use serde::Serialize;

use crate::domain::pagination::total_pages;

/// Position of the returned slice within the full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl PaginationMeta {
    pub fn new(page: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            page: page.max(1),
            page_size,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }
}
