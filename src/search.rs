//! Search parameters and their URL query-string representation.
//!
//! The address bar is the single source of truth for what is displayed:
//! [`SearchParams`] is parsed from the query string on every read and every
//! change builds a new value that replaces the URL.

use reqwest::Url;
use std::fmt;

const SCRATCH_BASE: &str = "http://localhost/";

pub const KEY_QUERY: &str = "q";
pub const KEY_FIELD: &str = "field";
pub const KEY_CATEGORY: &str = "category";
pub const KEY_CUISINE: &str = "cuisine";
pub const KEY_INGREDIENT: &str = "ingredient";
pub const KEY_MAX_READY_TIME: &str = "maxReadyTime";
pub const KEY_PAGE: &str = "page";
pub const KEY_SORT: &str = "sort";

const KNOWN_KEYS: [&str; 8] = [
    KEY_QUERY,
    KEY_FIELD,
    KEY_CATEGORY,
    KEY_CUISINE,
    KEY_INGREDIENT,
    KEY_MAX_READY_TIME,
    KEY_PAGE,
    KEY_SORT,
];

/// Category shown when none is selected; never sent to the backend
pub const ALL_CATEGORIES: &str = "All";

/// Ordered, form-urlencoded key/value pairs of a URL query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `a=1&b=2`, with or without the leading `?`
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        if query.is_empty() {
            return Self::new();
        }

        let pairs = Url::parse(&format!("{}?{}", SCRATCH_BASE, query))
            .map(|url| Self::from_url(&url).pairs)
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn from_url(url: &Url) -> Self {
        let pairs = url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Overwrite the first `key` in place (dropping duplicates) or append it
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(index) => {
                self.pairs[index].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-urlencoded query without the leading `?`
    pub fn encode(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        Url::parse_with_params(SCRATCH_BASE, &self.pairs)
            .ok()
            .and_then(|url| url.query().map(str::to_owned))
            .unwrap_or_default()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pairs.is_empty() {
            Ok(())
        } else {
            write!(f, "?{}", self.encode())
        }
    }
}

/// Result ordering offered by the backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    #[default]
    Relevance,
    TimeAsc,
    TimeDesc,
    RatingDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] = [
        SortMode::Relevance,
        SortMode::TimeAsc,
        SortMode::TimeDesc,
        SortMode::RatingDesc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Relevance => "relevance",
            SortMode::TimeAsc => "time_asc",
            SortMode::TimeDesc => "time_desc",
            SortMode::RatingDesc => "rating_desc",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Relevance => "Relevance",
            SortMode::TimeAsc => "Time: Low to High",
            SortMode::TimeDesc => "Time: High to Low",
            SortMode::RatingDesc => "Rating: High to Low",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.as_str() == value)
    }
}

/// Which part of a recipe the free-text query is aimed at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchField {
    #[default]
    Keyword,
    Ingredient,
    Cuisine,
}

impl SearchField {
    pub const ALL: [SearchField; 3] = [
        SearchField::Keyword,
        SearchField::Ingredient,
        SearchField::Cuisine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Keyword => "keyword",
            SearchField::Ingredient => "ingredient",
            SearchField::Cuisine => "cuisine",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Keyword => "Keyword",
            SearchField::Ingredient => "Ingredient",
            SearchField::Cuisine => "Cuisine",
        }
    }

    pub fn from_param(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == value)
    }
}

/// Values chosen in the filters sidebar
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub cuisine: Option<String>,
    pub ingredient: Option<String>,
    pub max_ready_time: Option<u32>,
    /// `None` keeps whatever sort is currently active
    pub sort: Option<SortMode>,
}

/// Everything that determines the displayed result page.
///
/// Only keys present in the URL are `Some`; the `effective_*` accessors
/// apply the defaults. Unknown keys are carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: Option<String>,
    pub field: Option<SearchField>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub ingredient: Option<String>,
    pub max_ready_time: Option<u32>,
    pub page: Option<u32>,
    pub sort: Option<SortMode>,
    extra: Vec<(String, String)>,
}

impl SearchParams {
    pub fn from_query(query: &QueryString) -> Self {
        let text = |key: &str| non_empty(query.get(key));

        Self {
            query: text(KEY_QUERY),
            field: query
                .get(KEY_FIELD)
                .and_then(SearchField::from_param)
                .filter(|field| *field != SearchField::Keyword),
            category: text(KEY_CATEGORY),
            cuisine: text(KEY_CUISINE),
            ingredient: text(KEY_INGREDIENT),
            max_ready_time: query
                .get(KEY_MAX_READY_TIME)
                .and_then(|value| value.trim().parse().ok()),
            page: query
                .get(KEY_PAGE)
                .and_then(|value| value.trim().parse().ok())
                .filter(|page| *page >= 1),
            sort: query.get(KEY_SORT).and_then(SortMode::from_param),
            extra: query
                .pairs()
                .filter(|(key, _)| !KNOWN_KEYS.contains(key))
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    pub fn parse(query: &str) -> Self {
        Self::from_query(&QueryString::parse(query))
    }

    /// Canonical query: known keys in a fixed order, then unknown keys
    pub fn to_query(&self) -> QueryString {
        let mut query = QueryString::new();
        if let Some(q) = &self.query {
            query.set(KEY_QUERY, q.as_str());
        }
        if let Some(field) = self.field {
            query.set(KEY_FIELD, field.as_str());
        }
        if let Some(category) = &self.category {
            query.set(KEY_CATEGORY, category.as_str());
        }
        if let Some(cuisine) = &self.cuisine {
            query.set(KEY_CUISINE, cuisine.as_str());
        }
        if let Some(ingredient) = &self.ingredient {
            query.set(KEY_INGREDIENT, ingredient.as_str());
        }
        if let Some(minutes) = self.max_ready_time {
            query.set(KEY_MAX_READY_TIME, minutes.to_string());
        }
        if let Some(page) = self.page {
            query.set(KEY_PAGE, page.to_string());
        }
        if let Some(sort) = self.sort {
            query.set(KEY_SORT, sort.as_str());
        }
        query.pairs.extend(self.extra.iter().cloned());
        query
    }

    pub fn query_text(&self) -> &str {
        self.query.as_deref().unwrap_or("")
    }

    pub fn effective_field(&self) -> SearchField {
        self.field.unwrap_or_default()
    }

    pub fn effective_category(&self) -> &str {
        self.category.as_deref().unwrap_or(ALL_CATEGORIES)
    }

    pub fn effective_sort(&self) -> SortMode {
        self.sort.unwrap_or_default()
    }

    pub fn effective_page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// New free-text search: page 1, relevance order
    pub fn with_search(&self, text: &str, field: SearchField) -> Self {
        let mut next = self.clone();
        next.query = non_empty(Some(text));
        next.field = Some(field).filter(|f| *f != SearchField::Keyword);
        next.page = Some(1);
        next.sort = Some(SortMode::Relevance);
        next
    }

    /// New category: page 1, relevance order
    pub fn with_category(&self, category: &str) -> Self {
        let mut next = self.clone();
        next.category = non_empty(Some(category));
        next.page = Some(1);
        next.sort = Some(SortMode::Relevance);
        next
    }

    /// Sidebar filters: page 1, sort kept unless the selection names one
    pub fn with_filters(&self, filters: &FilterSelection) -> Self {
        let mut next = self.clone();
        next.cuisine = non_empty(filters.cuisine.as_deref());
        next.ingredient = non_empty(filters.ingredient.as_deref());
        next.max_ready_time = filters.max_ready_time;
        if let Some(sort) = filters.sort {
            next.sort = Some(sort);
        }
        next.page = Some(1);
        next
    }

    pub fn with_sort(&self, sort: SortMode) -> Self {
        let mut next = self.clone();
        next.sort = Some(sort);
        next.page = Some(1);
        next
    }

    /// Drop cuisine, ingredient, ready time and sort; back to page 1
    pub fn reset_filters(&self) -> Self {
        let mut next = self.clone();
        next.cuisine = None;
        next.ingredient = None;
        next.max_ready_time = None;
        next.sort = None;
        next.page = Some(1);
        next
    }

    pub fn with_page(&self, page: u32) -> Self {
        let mut next = self.clone();
        next.page = Some(page.max(1));
        next
    }

    /// The backend request these parameters stand for
    pub fn to_request(&self, page_size: u32) -> SearchRequest {
        SearchRequest {
            q: self.query_text().to_string(),
            category: self
                .category
                .clone()
                .filter(|category| category != ALL_CATEGORIES),
            cuisine: self.cuisine.clone(),
            ingredient: self.ingredient.clone(),
            max_ready_time: self.max_ready_time,
            sort: self.effective_sort(),
            page: self.effective_page(),
            page_size,
        }
    }
}

impl fmt::Display for SearchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_query().fmt(f)
    }
}

/// Parameters of one `/recipes/search` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub ingredient: Option<String>,
    pub max_ready_time: Option<u32>,
    pub sort: SortMode,
    pub page: u32,
    pub page_size: u32,
}

impl Default for SearchRequest {
    fn default() -> Self {
        SearchParams::default().to_request(24)
    }
}

impl SearchRequest {
    /// Query pairs for the backend; empty filters are left out
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if !self.q.is_empty() {
            pairs.push((KEY_QUERY, self.q.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push((KEY_CATEGORY, category.clone()));
        }
        if let Some(cuisine) = &self.cuisine {
            pairs.push((KEY_CUISINE, cuisine.clone()));
        }
        if let Some(ingredient) = &self.ingredient {
            pairs.push((KEY_INGREDIENT, ingredient.clone()));
        }
        if let Some(minutes) = self.max_ready_time {
            pairs.push((KEY_MAX_READY_TIME, minutes.to_string()));
        }
        pairs.push((KEY_SORT, self.sort.as_str().to_string()));
        pairs.push((KEY_PAGE, self.page.to_string()));
        pairs.push(("pageSize", self.page_size.to_string()));
        pairs
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
