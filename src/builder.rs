use std::time::Duration;

use crate::api::{ApiMode, ClientFactory};
use crate::config::ExplorerConfig;
use crate::explorer::Explorer;
use crate::location::MemoryLocation;
use crate::ExplorerError;

/// Builder for configuring an [`Explorer`] session
#[derive(Debug, Default)]
pub struct ExplorerBuilder {
    config: Option<ExplorerConfig>,
    api_base: Option<String>,
    demo: bool,
    timeout: Option<Duration>,
    page_size: Option<u32>,
    location: Option<String>,
}

impl ExplorerBuilder {
    /// Start from a loaded configuration instead of the defaults
    ///
    /// # Example
    /// ```no_run
    /// use recipe_explorer::{ExplorerConfig, RecipeExplorer};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let builder = RecipeExplorer::builder().config(ExplorerConfig::load()?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn config(mut self, config: ExplorerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Talk to the backend at `base_url`
    ///
    /// # Example
    /// ```
    /// use recipe_explorer::RecipeExplorer;
    ///
    /// let builder = RecipeExplorer::builder()
    ///     .api_base("https://recipes.example.com/api");
    /// ```
    pub fn api_base(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = Some(base_url.into());
        self
    }

    /// Serve synthetic data even if a backend is configured
    pub fn demo(mut self) -> Self {
        self.demo = true;
        self
    }

    /// Set a timeout for backend requests
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Number of recipes per result page
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Initial address, e.g. a shared link or just `?q=soup&page=2`
    ///
    /// # Example
    /// ```
    /// use recipe_explorer::RecipeExplorer;
    ///
    /// let builder = RecipeExplorer::builder()
    ///     .location("?q=chicken&category=Dinner");
    /// ```
    pub fn location(mut self, address: impl Into<String>) -> Self {
        self.location = Some(address.into());
        self
    }

    /// Build the explorer
    ///
    /// # Errors
    /// Returns `ExplorerError` if:
    /// - The page size is zero
    /// - The timeout is zero, negative or not finite
    /// - The initial location is not a valid URL
    /// - The backend base URL is invalid
    ///
    /// # Example
    /// ```
    /// # use recipe_explorer::RecipeExplorer;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let explorer = RecipeExplorer::builder().demo().build()?;
    /// explorer.refresh().await;
    /// assert_eq!(explorer.snapshot().await.results.items().len(), 12);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Explorer<MemoryLocation>, ExplorerError> {
        let mut config = self.resolve_config()?;
        let page_size = config.api.page_size;

        let mode = if self.demo {
            ApiMode::Demo
        } else if let Some(base) = self.api_base {
            config.api.base_url = Some(base);
            ApiMode::from_config(&config)
        } else {
            ApiMode::from_config(&config)
        };

        let location = MemoryLocation::new(self.location.as_deref().unwrap_or("/"))?;
        let api = ClientFactory::create(&mode, &config)?;
        Ok(Explorer::new(api, location, page_size))
    }

    /// Configuration with the builder's overrides applied, validated
    fn resolve_config(&self) -> Result<ExplorerConfig, ExplorerError> {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(timeout) = self.timeout {
            config.api.timeout = timeout.as_secs_f64();
        }
        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                return Err(ExplorerError::BuilderError(
                    "Page size must be at least 1".to_string(),
                ));
            }
            config.api.page_size = page_size;
        }
        Ok(config.validate()?)
    }
}

/// Main entry point for the builder API
pub struct RecipeExplorer;

impl RecipeExplorer {
    /// Creates a new builder for an explorer session
    pub fn builder() -> ExplorerBuilder {
        ExplorerBuilder::default()
    }
}
