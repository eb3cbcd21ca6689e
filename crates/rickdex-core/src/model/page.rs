use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rickdex_api::PageMeta;

use super::{Entity, EntityKind};

/// Pagination metadata for one fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_count: u64,
    /// Always at least 1, even for an empty result.
    pub total_pages: u32,
    /// The page that was requested. May exceed `total_pages` when the
    /// result set shrank underneath the pager.
    pub current_page: u32,
}

impl PageInfo {
    /// Build from the upstream `info` block.
    ///
    /// Negative counts clamp to zero. A missing `pages` falls back to the
    /// requested page (degenerate single-page case), so the requested page
    /// is never out of range by omission.
    pub fn from_meta(meta: Option<&PageMeta>, requested_page: u32, item_count: usize) -> Self {
        let current_page = requested_page.max(1);
        let total_count = meta
            .and_then(|m| m.count)
            .map_or(item_count as u64, |c| u64::try_from(c.max(0)).unwrap_or(0));
        let total_pages = meta.and_then(|m| m.pages).map_or(current_page, |p| {
            u32::try_from(p.max(1)).unwrap_or(u32::MAX)
        });

        Self {
            total_count,
            total_pages,
            current_page,
        }
    }

    /// Zero items: a valid terminal state with one (empty) page.
    pub fn empty(requested_page: u32) -> Self {
        Self {
            total_count: 0,
            total_pages: 1,
            current_page: requested_page.max(1),
        }
    }
}

/// One fetched page of a list endpoint. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse {
    pub kind: EntityKind,
    pub items: Vec<Arc<Entity>>,
    pub page_info: PageInfo,
}

impl ListResponse {
    pub fn empty(kind: EntityKind, requested_page: u32) -> Self {
        Self {
            kind,
            items: Vec::new(),
            page_info: PageInfo::empty(requested_page),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(count: Option<i64>, pages: Option<i64>) -> PageMeta {
        PageMeta {
            count,
            pages,
            next: None,
            prev: None,
        }
    }

    #[test]
    fn uses_reported_totals() {
        let info = PageInfo::from_meta(Some(&meta(Some(826), Some(42))), 3, 20);
        assert_eq!(info.total_count, 826);
        assert_eq!(info.total_pages, 42);
        assert_eq!(info.current_page, 3);
    }

    #[test]
    fn missing_meta_defaults_to_current_page() {
        let info = PageInfo::from_meta(None, 4, 7);
        assert_eq!(info.total_pages, 4);
        assert_eq!(info.total_count, 7);
    }

    #[test]
    fn negative_counts_clamp() {
        let info = PageInfo::from_meta(Some(&meta(Some(-5), Some(-1))), 1, 0);
        assert_eq!(info.total_count, 0);
        assert_eq!(info.total_pages, 1);
    }

    #[test]
    fn narrowed_result_is_out_of_range() {
        let info = PageInfo::from_meta(Some(&meta(Some(5), Some(1))), 2, 5);
        assert_eq!(info.current_page, 2);
        assert!(info.total_pages < info.current_page);
    }
}
