// ── Pagination controller ──
//
// One cursor per list view. The invariant `1 <= page <= total_pages` holds
// after every transition, including deserialization.

use serde::{Deserialize, Serialize};

use crate::model::PageInfo;

/// Outcome of reconciling the pager with a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerSignal {
    /// The current page is within the reported bounds.
    InRange,
    /// The result set no longer reaches the page that was shown; the pager
    /// moved back to page 1 and the caller should re-request.
    Reset { from: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "PagerState")]
pub struct Pager {
    page: u32,
    total_pages: u32,
}

/// Unvalidated serialized form.
#[derive(Deserialize)]
struct PagerState {
    page: u32,
    total_pages: u32,
}

impl From<PagerState> for Pager {
    fn from(raw: PagerState) -> Self {
        let total_pages = raw.total_pages.max(1);
        Self {
            page: raw.page.clamp(1, total_pages),
            total_pages,
        }
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            total_pages: 1,
        }
    }
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pager positioned on `page` before any totals are known. The total
    /// is assumed equal to the page until a response says otherwise.
    pub fn starting_at(page: u32) -> Self {
        let page = page.max(1);
        Self {
            page,
            total_pages: page,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Step back one page. No-op at page 1. Returns whether it moved.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Step forward one page. No-op at the last page. Returns whether it moved.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.page += 1;
        true
    }

    /// Move to `page`, clamped into the known bounds.
    pub fn jump(&mut self, page: u32) -> bool {
        let target = page.clamp(1, self.total_pages);
        let moved = target != self.page;
        self.page = target;
        moved
    }

    /// Back to page 1 (e.g. after a filter edit). Returns whether it moved.
    pub fn reset(&mut self) -> bool {
        let moved = self.page != 1;
        self.page = 1;
        moved
    }

    /// Adopt the totals of a fetched page.
    pub fn observe(&mut self, info: &PageInfo) -> PagerSignal {
        self.total_pages = info.total_pages.max(1);
        if self.page > self.total_pages {
            let from = self.page;
            self.page = 1;
            PagerSignal::Reset { from }
        } else {
            PagerSignal::InRange
        }
    }
}
