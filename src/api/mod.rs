mod demo;
mod factory;
mod fallback;
mod http;

pub use demo::DemoRecipeApi;
pub use factory::{ApiMode, ClientFactory};
pub use fallback::FallbackLists;
pub use http::HttpRecipeApi;

use async_trait::async_trait;

use crate::config::ListsConfig;
use crate::model::{Recipe, ResultPage};
use crate::search::SearchRequest;
use crate::ExplorerError;

/// Read-only access to the recipe catalog
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Short name of the strategy (e.g., "live", "demo")
    fn client_name(&self) -> &str;

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError>;

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError>;

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError>;

    async fn search_recipes(&self, request: &SearchRequest) -> Result<ResultPage, ExplorerError>;

    /// Fails with [`ExplorerError::NotFound`] when the id is unknown
    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError>;
}

/// Upper bounds on the filter lists handed to the views
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimits {
    pub categories: usize,
    pub cuisines: usize,
    pub ingredients: usize,
}

impl Default for ListLimits {
    fn default() -> Self {
        ListsConfig::default().into()
    }
}

impl From<ListsConfig> for ListLimits {
    fn from(config: ListsConfig) -> Self {
        Self {
            categories: config.max_categories,
            cuisines: config.max_cuisines,
            ingredients: config.max_ingredients,
        }
    }
}

fn capped(mut list: Vec<String>, limit: usize) -> Vec<String> {
    list.truncate(limit);
    list
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
