use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::{capped, ListLimits, RecipeApi};
use crate::model::{Recipe, ResultPage};
use crate::search::SearchRequest;
use crate::ExplorerError;

/// Client for a live catalog backend.
///
/// One GET per call; any non-success status or transport failure is returned
/// to the caller as is.
pub struct HttpRecipeApi {
    client: Client,
    base_url: Url,
    limits: ListLimits,
}

impl HttpRecipeApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ExplorerError> {
        let parsed = Url::parse(base_url.trim())
            .map_err(|e| ExplorerError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ExplorerError::InvalidBaseUrl(base_url.to_string()));
        }

        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-explorer/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: parsed,
            limits: ListLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: ListLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each one percent-encoded
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ExplorerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ExplorerError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(&str, String)],
    ) -> Result<T, ExplorerError> {
        debug!("GET {}", url);

        let mut request = self.client.get(url.clone()).header(ACCEPT, "application/json");
        if !params.is_empty() {
            request = request.query(params);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} answered with status {}", url, status);
            return Err(ExplorerError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list(&self, name: &str, limit: usize) -> Result<Vec<String>, ExplorerError> {
        let list: Vec<String> = self.get(self.endpoint(&[name])?, &[]).await?;
        if list.len() > limit {
            debug!("Capping {} from {} to {} entries", name, list.len(), limit);
        }
        Ok(capped(list, limit))
    }
}

#[async_trait]
impl RecipeApi for HttpRecipeApi {
    fn client_name(&self) -> &str {
        "live"
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
        self.get_list("categories", self.limits.categories).await
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
        self.get_list("cuisines", self.limits.cuisines).await
    }

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
        self.get_list("ingredients", self.limits.ingredients).await
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<ResultPage, ExplorerError> {
        let url = self.endpoint(&["recipes", "search"])?;
        self.get(url, &request.query_pairs()).await
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
        let url = self.endpoint(&["recipes", id])?;
        match self.get(url, &[]).await {
            Err(ExplorerError::Status(code)) if code == StatusCode::NOT_FOUND.as_u16() => {
                Err(ExplorerError::NotFound(id.to_string()))
            }
            other => other,
        }
    }
}
