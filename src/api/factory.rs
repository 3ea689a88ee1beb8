use log::info;

use super::{DemoRecipeApi, FallbackLists, HttpRecipeApi, ListLimits, RecipeApi};
use crate::config::ExplorerConfig;
use crate::ExplorerError;

/// Which catalog the explorer talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiMode {
    /// A real backend at the given base URL
    Live(String),
    /// Deterministic synthetic data, no network
    Demo,
}

impl ApiMode {
    /// `Demo` unless a non-blank base URL is configured
    pub fn from_config(config: &ExplorerConfig) -> Self {
        match config.api.base_url() {
            Some(base) => ApiMode::Live(base.to_string()),
            None => ApiMode::Demo,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ApiMode::Live(_) => "live",
            ApiMode::Demo => "demo",
        }
    }
}

pub struct ClientFactory;

impl ClientFactory {
    /// Create a client for the mode selected by configuration
    pub fn from_config(config: &ExplorerConfig) -> Result<Box<dyn RecipeApi>, ExplorerError> {
        Self::create(&ApiMode::from_config(config), config)
    }

    /// Create a client for an explicit mode, taking limits and timeouts from `config`
    pub fn create(
        mode: &ApiMode,
        config: &ExplorerConfig,
    ) -> Result<Box<dyn RecipeApi>, ExplorerError> {
        let limits = ListLimits::from(config.lists.clone());

        match mode {
            ApiMode::Demo => {
                info!("No API base URL configured, serving demo data");
                Ok(Box::new(DemoRecipeApi::with_limits(limits)))
            }
            ApiMode::Live(base_url) => {
                info!("Using recipe backend at {}", base_url);
                let live = HttpRecipeApi::new(base_url, config.api.request_timeout())?
                    .with_limits(limits);
                if config.lists.fallback_on_error {
                    Ok(Box::new(FallbackLists::new(Box::new(live))))
                } else {
                    Ok(Box::new(live))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_base(base_url: Option<&str>) -> ExplorerConfig {
        let mut config = ExplorerConfig::default();
        config.api.base_url = base_url.map(str::to_string);
        config
    }

    #[test]
    fn test_mode_from_config() {
        assert_eq!(ApiMode::from_config(&config_with_base(None)), ApiMode::Demo);
        assert_eq!(ApiMode::from_config(&config_with_base(Some(""))), ApiMode::Demo);
        assert_eq!(
            ApiMode::from_config(&config_with_base(Some("http://localhost:8080"))),
            ApiMode::Live("http://localhost:8080".to_string())
        );
    }

    #[test]
    fn test_create_demo_client() {
        let client = ClientFactory::from_config(&config_with_base(None)).unwrap();
        assert_eq!(client.client_name(), "demo");
    }

    #[test]
    fn test_create_live_client() {
        let client =
            ClientFactory::from_config(&config_with_base(Some("http://localhost:8080"))).unwrap();
        assert_eq!(client.client_name(), "live");

        let mut config = config_with_base(Some("http://localhost:8080"));
        config.lists.fallback_on_error = false;
        let client = ClientFactory::from_config(&config).unwrap();
        assert_eq!(client.client_name(), "live");
    }

    #[test]
    fn test_create_with_bad_base_url() {
        let result = ClientFactory::from_config(&config_with_base(Some("::nope::")));
        assert!(matches!(result, Err(ExplorerError::InvalidBaseUrl(_))));
    }
}
