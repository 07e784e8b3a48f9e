use serde::{Deserialize, Serialize};

/// One page of an already filtered and sorted collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice<T> {
    pub items: Vec<T>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Slice a collection into the requested page.
///
/// The page number is clamped to `[1, total_pages]`, so a request past the
/// end serves the last page instead of an empty one. An empty collection
/// yields page 1 of 0 pages with no items.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> PageSlice<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = if start < total_items {
        items[start..end].to_vec()
    } else {
        Vec::new()
    };

    PageSlice {
        items,
        page,
        total_pages,
        total_items,
    }
}
