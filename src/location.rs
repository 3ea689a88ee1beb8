use reqwest::Url;

use crate::search::{QueryString, SearchParams};
use crate::ExplorerError;

const DEFAULT_ORIGIN: &str = "http://localhost/";

/// The address bar: the only place search state is read from or written to
pub trait Location: Send {
    /// Query string currently shown
    fn current(&self) -> QueryString;

    /// Swap the query string in place, without adding a history entry
    fn replace(&mut self, query: &QueryString);

    fn search_params(&self) -> SearchParams {
        SearchParams::from_query(&self.current())
    }

    fn navigate(&mut self, params: &SearchParams) {
        self.replace(&params.to_query());
    }
}

/// In-memory location used by the CLI and in tests
#[derive(Debug, Clone)]
pub struct MemoryLocation {
    url: Url,
    replacements: usize,
}

impl MemoryLocation {
    /// Accepts an absolute URL, a bare `?query` or a path such as `/?q=soup`
    pub fn new(address: &str) -> Result<Self, ExplorerError> {
        let url = Url::parse(address)
            .or_else(|_| Url::parse(DEFAULT_ORIGIN).and_then(|origin| origin.join(address)))
            .map_err(|e| {
                ExplorerError::BuilderError(format!("Invalid location '{}': {}", address, e))
            })?;

        Ok(Self {
            url,
            replacements: 0,
        })
    }

    pub fn href(&self) -> &str {
        self.url.as_str()
    }

    /// How many times the query was replaced
    pub fn replacements(&self) -> usize {
        self.replacements
    }
}

impl Location for MemoryLocation {
    fn current(&self) -> QueryString {
        QueryString::from_url(&self.url)
    }

    fn replace(&mut self, query: &QueryString) {
        if query.is_empty() {
            self.url.set_query(None);
        } else {
            self.url.set_query(Some(&query.encode()));
        }
        self.replacements += 1;
    }
}
