pub mod api;
pub mod builder;
pub mod config;
pub mod detail;
pub mod error;
pub mod explorer;
pub mod location;
pub mod model;
pub mod render;
pub mod results;
pub mod search;

// Re-export commonly used types
pub use api::{ApiMode, ClientFactory, RecipeApi};
pub use builder::{ExplorerBuilder, RecipeExplorer};
pub use config::ExplorerConfig;
pub use detail::{DetailOverlay, DetailState};
pub use error::ExplorerError;
pub use explorer::{Explorer, ExplorerView, FilterLists};
pub use location::{Location, MemoryLocation};
pub use model::{IngredientEntry, Nutrition, Recipe, ResultPage};
pub use results::{Pagination, ResultView};
pub use search::{FilterSelection, SearchField, SearchParams, SearchRequest, SortMode};

/// Search the configured catalog with a URL query string such as
/// `?q=chicken&category=Dinner&page=2`.
///
/// Configuration is read from `recipe-explorer.toml` and `RECIPE_EXPLORER__*`
/// environment variables; without a backend the demo catalog answers. An
/// unusable configuration, such as `page_size = 0`, fails before any request.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_explorer::ExplorerError> {
/// let page = recipe_explorer::search_catalog("?q=chicken&sort=time_asc").await?;
/// println!("{} of {} recipes", page.items.len(), page.total);
/// # Ok(())
/// # }
/// ```
pub async fn search_catalog(query: &str) -> Result<ResultPage, ExplorerError> {
    let config = ExplorerConfig::load()?;
    let client = ClientFactory::from_config(&config)?;
    let request = SearchParams::parse(query).to_request(config.api.page_size);
    client.search_recipes(&request).await
}

/// Fetch one recipe from the configured catalog
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_explorer::ExplorerError> {
/// let recipe = recipe_explorer::fetch_recipe("1-3").await?;
/// println!("{}", recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_recipe(id: &str) -> Result<Recipe, ExplorerError> {
    let config = ExplorerConfig::load()?;
    let client = ClientFactory::from_config(&config)?;
    client.get_recipe(id).await
}
