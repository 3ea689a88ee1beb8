//! The browsing session: address bar, filter lists, result grid and overlay.
//!
//! Every user action turns into a new [`SearchParams`] value that replaces the
//! location; when the effective backend request changed, exactly one search is
//! issued. View state sits behind one async mutex that is never held across a
//! network call, so overlapping actions stay responsive and stale answers are
//! filtered by their tickets.

use log::{debug, error, info};
use tokio::sync::Mutex;

use crate::api::RecipeApi;
use crate::detail::{DetailOverlay, DetailState};
use crate::location::{Location, MemoryLocation};
use crate::results::{Pagination, ResultView};
use crate::search::{FilterSelection, SearchField, SearchParams, SearchRequest, SortMode, ALL_CATEGORIES};
use crate::ExplorerError;

/// Values offered by the category chips and the filters sidebar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterLists {
    /// Starts with "All" once loaded
    pub categories: Vec<String>,
    pub cuisines: Vec<String>,
    pub ingredients: Vec<String>,
}

/// Everything needed to draw the page at one point in time
#[derive(Debug, Clone)]
pub struct ExplorerView {
    pub params: SearchParams,
    pub lists: FilterLists,
    pub results: ResultView,
    pub pagination: Pagination,
    pub detail: DetailState,
}

struct ExplorerState<L> {
    location: L,
    lists: FilterLists,
    results: ResultView,
    detail: DetailOverlay,
    last_request: Option<SearchRequest>,
}

pub struct Explorer<L: Location = MemoryLocation> {
    api: Box<dyn RecipeApi>,
    page_size: u32,
    state: Mutex<ExplorerState<L>>,
}

impl<L: Location> Explorer<L> {
    pub fn new(api: Box<dyn RecipeApi>, location: L, page_size: u32) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            state: Mutex::new(ExplorerState {
                location,
                lists: FilterLists::default(),
                results: ResultView::new(),
                detail: DetailOverlay::new(),
                last_request: None,
            }),
        }
    }

    pub fn client_name(&self) -> &str {
        self.api.client_name()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch categories, cuisines and ingredients concurrently.
    ///
    /// A list that fails to load is logged and left empty.
    pub async fn load_filter_lists(&self) {
        let (categories, cuisines, ingredients) = tokio::join!(
            self.api.fetch_categories(),
            self.api.fetch_cuisines(),
            self.api.fetch_ingredients()
        );

        let mut state = self.state.lock().await;
        state.lists.categories = match categories {
            Ok(categories) => std::iter::once(ALL_CATEGORIES.to_string())
                .chain(categories.into_iter().filter(|c| c != ALL_CATEGORIES))
                .collect(),
            Err(e) => list_failed("categories", e),
        };
        state.lists.cuisines = cuisines.unwrap_or_else(|e| list_failed("cuisines", e));
        state.lists.ingredients = ingredients.unwrap_or_else(|e| list_failed("ingredients", e));
        info!(
            "Loaded {} categories, {} cuisines, {} ingredients",
            state.lists.categories.len(),
            state.lists.cuisines.len(),
            state.lists.ingredients.len()
        );
    }

    /// Search with whatever the location currently says.
    ///
    /// Returns `true` if this search's outcome is what the grid now shows,
    /// `false` if a newer search overtook it.
    pub async fn refresh(&self) -> bool {
        let (ticket, request) = {
            let mut state = self.state.lock().await;
            let request = state.location.search_params().to_request(self.page_size);
            state.last_request = Some(request.clone());
            (state.results.begin(), request)
        };

        debug!("Search #{}: {:?}", ticket.seq(), request);
        let outcome = self.api.search_recipes(&request).await;

        self.state.lock().await.results.commit(ticket, outcome)
    }

    /// Replace the location with `transition(current)` and search if the
    /// backend request changed. Returns what [`Explorer::refresh`] returned, or
    /// `false` when no search was needed.
    pub async fn navigate<F>(&self, transition: F) -> bool
    where
        F: FnOnce(&SearchParams) -> SearchParams,
    {
        let changed = {
            let mut state = self.state.lock().await;
            let next = transition(&state.location.search_params());
            state.location.navigate(&next);
            state.last_request.as_ref() != Some(&next.to_request(self.page_size))
        };

        if changed {
            self.refresh().await
        } else {
            debug!("Search parameters unchanged, keeping current results");
            false
        }
    }

    pub async fn search(&self, text: &str, field: SearchField) -> bool {
        self.navigate(|params| params.with_search(text, field)).await
    }

    pub async fn select_category(&self, category: &str) -> bool {
        self.navigate(|params| params.with_category(category)).await
    }

    pub async fn apply_filters(&self, filters: &FilterSelection) -> bool {
        self.navigate(|params| params.with_filters(filters)).await
    }

    pub async fn set_sort(&self, sort: SortMode) -> bool {
        self.navigate(|params| params.with_sort(sort)).await
    }

    pub async fn reset_filters(&self) -> bool {
        self.navigate(SearchParams::reset_filters).await
    }

    pub async fn set_page(&self, page: u32) -> bool {
        self.navigate(|params| params.with_page(page)).await
    }

    /// Move one page forward; no-op on the last page
    pub async fn next_page(&self) -> bool {
        let pagination = self.snapshot().await.pagination;
        if !pagination.has_next() {
            return false;
        }
        self.set_page(pagination.page + 1).await
    }

    /// Move one page back; no-op on the first page
    pub async fn previous_page(&self) -> bool {
        let pagination = self.snapshot().await.pagination;
        if !pagination.has_previous() {
            return false;
        }
        self.set_page(pagination.page - 1).await
    }

    /// Open the overlay for `id` and load its details.
    ///
    /// Returns `false` when the overlay was closed or moved to another recipe
    /// before the details arrived.
    pub async fn open_recipe(&self, id: &str) -> bool {
        let ticket = self.state.lock().await.detail.open(id);
        let outcome = self.api.get_recipe(ticket.id()).await;
        self.state.lock().await.detail.resolve(&ticket, outcome)
    }

    pub async fn close_recipe(&self) {
        self.state.lock().await.detail.close();
    }

    pub async fn params(&self) -> SearchParams {
        self.state.lock().await.location.search_params()
    }

    pub async fn snapshot(&self) -> ExplorerView {
        let state = self.state.lock().await;
        let params = state.location.search_params();
        let pagination = Pagination::new(
            params.effective_page(),
            self.page_size,
            state.results.total(),
        );
        ExplorerView {
            params,
            lists: state.lists.clone(),
            results: state.results.clone(),
            pagination,
            detail: state.detail.state().clone(),
        }
    }
}

impl Explorer<MemoryLocation> {
    /// Full address currently shown
    pub async fn href(&self) -> String {
        self.state.lock().await.location.href().to_string()
    }
}

fn list_failed(list: &str, e: ExplorerError) -> Vec<String> {
    error!("Failed to load {}: {}", list, e);
    Vec::new()
}
