use async_trait::async_trait;
use log::warn;

use super::{owned, RecipeApi};
use crate::model::{Recipe, ResultPage};
use crate::search::SearchRequest;
use crate::ExplorerError;

const FALLBACK_CATEGORIES: [&str; 4] = ["Breakfast", "Lunch", "Dinner", "Dessert"];
const FALLBACK_CUISINES: [&str; 3] = ["American", "Italian", "Mexican"];
const FALLBACK_INGREDIENTS: [&str; 4] = ["chicken", "tomato", "garlic", "onion"];

/// Keeps the filter lists usable when the backend's list endpoints fail.
///
/// Search and detail calls are passed through untouched so their failures
/// still reach the views.
pub struct FallbackLists {
    inner: Box<dyn RecipeApi>,
}

impl FallbackLists {
    pub fn new(inner: Box<dyn RecipeApi>) -> Self {
        Self { inner }
    }

    fn recover(
        &self,
        list: &str,
        result: Result<Vec<String>, ExplorerError>,
        fallback: &[&str],
    ) -> Vec<String> {
        match result {
            Ok(values) => values,
            Err(e) => {
                warn!(
                    "Loading {} from {} failed, using built-in list: {}",
                    list,
                    self.inner.client_name(),
                    e
                );
                owned(fallback)
            }
        }
    }
}

#[async_trait]
impl RecipeApi for FallbackLists {
    fn client_name(&self) -> &str {
        self.inner.client_name()
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
        let result = self.inner.fetch_categories().await;
        Ok(self.recover("categories", result, &FALLBACK_CATEGORIES))
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
        let result = self.inner.fetch_cuisines().await;
        Ok(self.recover("cuisines", result, &FALLBACK_CUISINES))
    }

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
        let result = self.inner.fetch_ingredients().await;
        Ok(self.recover("ingredients", result, &FALLBACK_INGREDIENTS))
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<ResultPage, ExplorerError> {
        self.inner.search_recipes(request).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
        self.inner.get_recipe(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenBackend;

    #[async_trait]
    impl RecipeApi for BrokenBackend {
        fn client_name(&self) -> &str {
            "broken"
        }

        async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
            Err(ExplorerError::Status(503))
        }

        async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
            Ok(vec!["Korean".to_string()])
        }

        async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
            Err(ExplorerError::Status(500))
        }

        async fn search_recipes(&self, _: &SearchRequest) -> Result<ResultPage, ExplorerError> {
            Err(ExplorerError::Status(500))
        }

        async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
            Err(ExplorerError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn test_failed_lists_use_builtin_values() {
        let api = FallbackLists::new(Box::new(BrokenBackend));

        assert_eq!(
            api.fetch_categories().await.unwrap(),
            vec!["Breakfast", "Lunch", "Dinner", "Dessert"]
        );
        assert_eq!(
            api.fetch_ingredients().await.unwrap(),
            vec!["chicken", "tomato", "garlic", "onion"]
        );
    }

    #[tokio::test]
    async fn test_successful_lists_pass_through() {
        let api = FallbackLists::new(Box::new(BrokenBackend));
        assert_eq!(api.fetch_cuisines().await.unwrap(), vec!["Korean"]);
        assert_eq!(api.client_name(), "broken");
    }

    #[tokio::test]
    async fn test_search_and_detail_errors_surface() {
        let api = FallbackLists::new(Box::new(BrokenBackend));

        let search = api.search_recipes(&SearchRequest::default()).await;
        assert!(matches!(search, Err(ExplorerError::Status(500))));

        let detail = api.get_recipe("9").await;
        assert!(matches!(detail, Err(ExplorerError::NotFound(id)) if id == "9"));
    }
}
