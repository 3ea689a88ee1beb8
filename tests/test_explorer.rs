use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;

use recipe_explorer::detail::DETAIL_ERROR_MESSAGE;
use recipe_explorer::results::SEARCH_ERROR_MESSAGE;
use recipe_explorer::{
    DetailState, Explorer, ExplorerError, MemoryLocation, Recipe, RecipeApi, ResultPage,
    SearchRequest,
};

/// Holds a call until the test releases it
struct Gate {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// Answers instantly unless a gate was registered for the call
#[derive(Default)]
struct GatedApi {
    gates: Mutex<HashMap<String, Gate>>,
}

impl GatedApi {
    fn gate(&self, key: &str) -> (oneshot::Receiver<()>, oneshot::Sender<()>) {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(
            key.to_string(),
            Gate {
                started: started_tx,
                release: release_rx,
            },
        );
        (started_rx, release_tx)
    }

    async fn pass(&self, key: String) {
        let gate = self.gates.lock().unwrap().remove(&key);
        if let Some(gate) = gate {
            let _ = gate.started.send(());
            let _ = gate.release.await;
        }
    }
}

#[async_trait]
impl RecipeApi for GatedApi {
    fn client_name(&self) -> &str {
        "gated"
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(vec!["Dinner".to_string()])
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(vec!["Thai".to_string()])
    }

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(vec!["basil".to_string()])
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<ResultPage, ExplorerError> {
        self.pass(format!("search:{}", request.page)).await;
        Ok(ResultPage {
            items: vec![Recipe {
                id: format!("page-{}", request.page),
                title: format!("Result on page {}", request.page),
                ..Default::default()
            }],
            total: 100,
        })
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
        self.pass(format!("recipe:{}", id)).await;
        Ok(Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            ..Default::default()
        })
    }
}

struct FailingApi;

#[async_trait]
impl RecipeApi for FailingApi {
    fn client_name(&self) -> &str {
        "failing"
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
        Err(ExplorerError::Status(503))
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
        Err(ExplorerError::Status(503))
    }

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
        Err(ExplorerError::Status(503))
    }

    async fn search_recipes(&self, _request: &SearchRequest) -> Result<ResultPage, ExplorerError> {
        Err(ExplorerError::Status(500))
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
        Err(ExplorerError::NotFound(id.to_string()))
    }
}

fn explorer_with(api: GatedApi) -> Explorer {
    Explorer::new(Box::new(api), MemoryLocation::new("/").unwrap(), 24)
}

#[tokio::test]
async fn test_latest_search_wins_when_earlier_one_finishes_last() {
    let api = GatedApi::default();
    let (a_started, release_a) = api.gate("search:1");
    let (_b_started, release_b) = api.gate("search:2");
    let explorer = explorer_with(api);
    let explorer = &explorer;

    let request_a = explorer.refresh();
    let rest = async move {
        a_started.await.unwrap();
        let request_b = explorer.set_page(2);
        release_b.send(()).unwrap();
        assert!(request_b.await);
        release_a.send(()).unwrap();
    };
    let (a_committed, ()) = tokio::join!(request_a, rest);

    assert!(!a_committed);
    let view = explorer.snapshot().await;
    assert!(!view.results.is_loading());
    assert_eq!(view.results.items().len(), 1);
    assert_eq!(view.results.items()[0].id, "page-2");
    assert_eq!(view.pagination.page, 2);
    assert_eq!(explorer.href().await, "http://localhost/?page=2");
}

#[tokio::test]
async fn test_grid_shows_loading_while_search_is_pending() {
    let api = GatedApi::default();
    let (started, release) = api.gate("search:1");
    let explorer = explorer_with(api);
    let explorer = &explorer;

    let request = explorer.refresh();
    let check = async move {
        started.await.unwrap();
        let view = explorer.snapshot().await;
        assert!(view.results.is_loading());
        assert_eq!(view.results.result_count_text(), "Loading...");
        release.send(()).unwrap();
    };
    let (committed, ()) = tokio::join!(request, check);

    assert!(committed);
    assert_eq!(
        explorer.snapshot().await.results.result_count_text(),
        "100 results"
    );
}

#[tokio::test]
async fn test_closing_overlay_discards_late_detail() {
    let api = GatedApi::default();
    let (started, release) = api.gate("recipe:7");
    let explorer = explorer_with(api);
    let explorer = &explorer;

    let open = explorer.open_recipe("7");
    let close = async move {
        started.await.unwrap();
        assert_eq!(
            explorer.snapshot().await.detail,
            DetailState::Loading {
                id: "7".to_string()
            }
        );
        explorer.close_recipe().await;
        release.send(()).unwrap();
    };
    let (landed, ()) = tokio::join!(open, close);

    assert!(!landed);
    assert_eq!(explorer.snapshot().await.detail, DetailState::Closed);
}

#[tokio::test]
async fn test_reselecting_recipe_discards_first_detail() {
    let api = GatedApi::default();
    let (started, release) = api.gate("recipe:7");
    let explorer = explorer_with(api);
    let explorer = &explorer;

    let first = explorer.open_recipe("7");
    let second = async move {
        started.await.unwrap();
        let landed = explorer.open_recipe("8").await;
        release.send(()).unwrap();
        landed
    };
    let (first_landed, second_landed) = tokio::join!(first, second);

    assert!(!first_landed);
    assert!(second_landed);
    let view = explorer.snapshot().await;
    assert_eq!(view.detail.recipe_id(), Some("8"));
    assert_eq!(view.detail.recipe().unwrap().title, "Recipe 8");
}

#[tokio::test]
async fn test_filter_lists_from_backend() {
    let explorer = explorer_with(GatedApi::default());
    explorer.load_filter_lists().await;

    let lists = explorer.snapshot().await.lists;
    assert_eq!(lists.categories, vec!["All", "Dinner"]);
    assert_eq!(lists.cuisines, vec!["Thai"]);
    assert_eq!(lists.ingredients, vec!["basil"]);
}

#[tokio::test]
async fn test_failed_lists_stay_empty() {
    let explorer = Explorer::new(
        Box::new(FailingApi),
        MemoryLocation::new("/").unwrap(),
        24,
    );
    explorer.load_filter_lists().await;

    let lists = explorer.snapshot().await.lists;
    assert!(lists.categories.is_empty());
    assert!(lists.cuisines.is_empty());
    assert!(lists.ingredients.is_empty());
}

#[tokio::test]
async fn test_failed_search_shows_error() {
    let explorer = Explorer::new(
        Box::new(FailingApi),
        MemoryLocation::new("?q=soup").unwrap(),
        24,
    );
    assert!(explorer.refresh().await);

    let view = explorer.snapshot().await;
    assert_eq!(view.results.error(), Some(SEARCH_ERROR_MESSAGE));
    assert!(view.results.items().is_empty());
    assert_eq!(view.results.result_count_text(), "0 results");
    assert_eq!(view.pagination.total_pages(), 0);
}

#[tokio::test]
async fn test_failed_detail_keeps_overlay_open() {
    let explorer = Explorer::new(
        Box::new(FailingApi),
        MemoryLocation::new("/").unwrap(),
        24,
    );
    assert!(explorer.open_recipe("404").await);

    let detail = explorer.snapshot().await.detail;
    assert!(detail.is_open());
    assert!(!detail.is_loading());
    assert_eq!(
        detail,
        DetailState::Failed {
            id: "404".to_string(),
            message: DETAIL_ERROR_MESSAGE.to_string()
        }
    );

    explorer.close_recipe().await;
    assert_eq!(explorer.snapshot().await.detail, DetailState::Closed);
}
