use log::{debug, error};

use crate::model::{Recipe, ResultPage};
use crate::ExplorerError;

pub const SEARCH_ERROR_MESSAGE: &str = "Failed to load recipes. Please try again.";
pub const NO_RESULTS_MESSAGE: &str = "No recipes found. Try different keywords or filters.";

/// Proof that a search was issued; only the newest ticket may commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    seq: u64,
}

impl RequestTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// State of the result grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultView {
    items: Vec<Recipe>,
    total: u64,
    loading: bool,
    error: Option<String>,
    issued: u64,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search. Keeps the current items visible and clears any error.
    pub fn begin(&mut self) -> RequestTicket {
        self.issued += 1;
        self.loading = true;
        self.error = None;
        RequestTicket { seq: self.issued }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.seq == self.issued
    }

    /// Apply a finished search. Returns `false` when a newer search was
    /// issued in the meantime and the outcome was dropped.
    pub fn commit(
        &mut self,
        ticket: RequestTicket,
        outcome: Result<ResultPage, ExplorerError>,
    ) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Dropping stale search #{} (latest is #{})",
                ticket.seq, self.issued
            );
            return false;
        }

        match outcome {
            Ok(page) => {
                self.items = page.items;
                self.total = page.total;
                self.error = None;
            }
            Err(e) => {
                error!("Search #{} failed: {}", ticket.seq, e);
                self.items.clear();
                self.total = 0;
                self.error = Some(SEARCH_ERROR_MESSAGE.to_string());
            }
        }
        self.loading = false;
        true
    }

    pub fn items(&self) -> &[Recipe] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Nothing to show and nothing pending
    pub fn is_empty(&self) -> bool {
        !self.loading && self.items.is_empty() && self.error.is_none()
    }

    pub fn result_count_text(&self) -> String {
        if self.loading {
            "Loading...".to_string()
        } else {
            format!("{} results", self.total)
        }
    }
}

/// Page navigation derived from the total count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total: u64,
}

impl Pagination {
    pub fn new(page: u32, page_size: u32, total: u64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn total_pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }
}
