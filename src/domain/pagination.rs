//! In-memory pagination over a fetched listing.

/// Returns the slice `[(page-1)*page_size, page*page_size)` of `items`.
///
/// Pages are 1-based; page 0 is read as page 1. Pages past the end yield an
/// empty slice.
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page_size == 0 {
        return &[];
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Number of pages needed for `total` items.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}
