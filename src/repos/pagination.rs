use serde::Serialize;

use crate::infra::github::link::LinkRelations;

/// Position within the paginated repository listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    /// Whether `total_pages` came from the server (a `last` relation or a
    /// `prev` without `next`) rather than the initial default.
    #[serde(skip)]
    pub total_known: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_known: false,
        }
    }
}

impl Pagination {
    /// State after successfully fetching `page` with the given `link` header.
    ///
    /// An explicit `last` relation wins. A `prev` without `next` means the
    /// fetched page is the last one. Otherwise the known total is kept.
    /// `current_page` never moves past a known last page; callers check
    /// [`Pagination::contains`] to tell whether `page` was accepted.
    pub fn advance(self, page: u32, links: Option<&LinkRelations>) -> Self {
        let resolved = links.and_then(|links| match links.page_of("last") {
            Some(last) => Some(last),
            None if links.contains("prev") && !links.contains("next") => Some(page),
            None => None,
        });

        let (total_pages, total_known) = match resolved {
            Some(total) => (total, true),
            None => (self.total_pages, self.total_known),
        };

        let mut next = Self {
            current_page: page,
            total_pages,
            total_known,
        };
        if !next.contains(page) {
            next.current_page = self.current_page.min(total_pages).max(1);
        }
        next
    }

    /// Whether `page` lies within the listing. Always true while the total
    /// is still unknown.
    pub fn contains(&self, page: u32) -> bool {
        page >= 1 && (!self.total_known || page <= self.total_pages)
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }
}
