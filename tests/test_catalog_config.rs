use recipe_explorer::{search_catalog, ExplorerError};

// Runs in its own test binary because it sets process-wide environment variables
#[tokio::test]
async fn test_search_catalog_rejects_zero_page_size() {
    std::env::set_var("RECIPE_EXPLORER__API__PAGE_SIZE", "0");

    let result = search_catalog("?q=soup").await;
    assert!(matches!(result, Err(ExplorerError::ConfigError(_))));

    std::env::remove_var("RECIPE_EXPLORER__API__PAGE_SIZE");
}
