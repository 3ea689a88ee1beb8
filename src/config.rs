use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::time::Duration;

/// Main explorer configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExplorerConfig {
    /// Backend connection settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Limits and fallbacks for the filter lists
    #[serde(default)]
    pub lists: ListsConfig,
}

/// Configuration for the recipe backend
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend. When missing or blank the demo client is used.
    pub base_url: Option<String>,
    /// Request timeout in seconds, fractions allowed (e.g. 2.5)
    #[serde(default = "default_timeout")]
    pub timeout: f64,
    /// Number of recipes requested per result page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

/// Configuration for the category/cuisine/ingredient lists
#[derive(Debug, Deserialize, Clone)]
pub struct ListsConfig {
    /// Maximum number of categories kept from the backend
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
    /// Maximum number of cuisines kept from the backend
    #[serde(default = "default_max_cuisines")]
    pub max_cuisines: usize,
    /// Maximum number of ingredients kept from the backend
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,
    /// Serve short built-in lists when a list endpoint fails
    #[serde(default = "default_fallback_on_error")]
    pub fallback_on_error: bool,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            max_categories: default_max_categories(),
            max_cuisines: default_max_cuisines(),
            max_ingredients: default_max_ingredients(),
            fallback_on_error: default_fallback_on_error(),
        }
    }
}

// Default value functions
fn default_timeout() -> f64 {
    30.0
}

fn default_page_size() -> u32 {
    24
}

fn default_max_categories() -> usize {
    50
}

fn default_max_cuisines() -> usize {
    50
}

fn default_max_ingredients() -> usize {
    200
}

fn default_fallback_on_error() -> bool {
    false
}

impl ApiConfig {
    /// Base URL with surrounding whitespace removed, `None` when blank
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }

    /// `None` unless `timeout` is a positive, finite number of seconds
    pub fn request_timeout(&self) -> Option<Duration> {
        Duration::try_from_secs_f64(self.timeout)
            .ok()
            .filter(|timeout| !timeout.is_zero())
    }
}

impl ExplorerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_EXPLORER__ prefix
    /// 2. recipe-explorer.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_EXPLORER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse configuration from a TOML document, ignoring the environment
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()
    }

    /// Reject values no request could be made with
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.api.page_size == 0 {
            return Err(ConfigError::Message(
                "api.page_size must be at least 1".to_string(),
            ));
        }
        if self.api.request_timeout().is_none() {
            return Err(ConfigError::Message(format!(
                "api.timeout must be a positive number of seconds, got {}",
                self.api.timeout
            )));
        }
        Ok(self)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ExplorerConfig::load`] for the lookup order.
pub fn load_config() -> Result<ExplorerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-explorer").required(false))
        // Use double underscore for nested: RECIPE_EXPLORER__API__BASE_URL
        .add_source(
            Environment::with_prefix("RECIPE_EXPLORER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize::<ExplorerConfig>()?.validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_timeout(), 30.0);
        assert_eq!(default_page_size(), 24);
        assert_eq!(default_max_ingredients(), 200);
        assert!(!default_fallback_on_error());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ExplorerConfig::from_toml("").unwrap();
        assert!(config.api.base_url().is_none());
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.api.page_size, 24);
        assert_eq!(config.lists.max_categories, 50);
        assert_eq!(config.lists.max_ingredients, 200);
        assert!(!config.lists.fallback_on_error);
    }

    #[test]
    fn test_toml_overrides() {
        let config = ExplorerConfig::from_toml(
            r#"
            [api]
            base_url = "https://recipes.example.com/v1"
            page_size = 12

            [lists]
            max_ingredients = 20
            fallback_on_error = true
            "#,
        )
        .unwrap();

        assert_eq!(
            config.api.base_url(),
            Some("https://recipes.example.com/v1")
        );
        assert_eq!(config.api.page_size, 12);
        assert_eq!(config.api.timeout, 30.0);
        assert_eq!(config.lists.max_ingredients, 20);
        assert!(config.lists.fallback_on_error);
    }

    #[test]
    fn test_fractional_timeout() {
        let config = ExplorerConfig::from_toml("[api]\ntimeout = 2.5\n").unwrap();
        assert_eq!(
            config.api.request_timeout(),
            Some(Duration::from_millis(2500))
        );
    }

    #[test]
    fn test_unusable_values_are_rejected() {
        assert!(ExplorerConfig::from_toml("[api]\npage_size = 0\n").is_err());
        assert!(ExplorerConfig::from_toml("[api]\ntimeout = 0\n").is_err());
        assert!(ExplorerConfig::from_toml("[api]\ntimeout = -3\n").is_err());
    }

    #[test]
    fn test_blank_base_url_is_absent() {
        let api = ApiConfig {
            base_url: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(api.base_url().is_none());
    }
}
