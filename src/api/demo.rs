use async_trait::async_trait;
use log::debug;

use super::{capped, owned, ListLimits, RecipeApi};
use crate::model::{Amount, IngredientEntry, Instructions, Nutrition, NutritionFacts, Recipe, ResultPage};
use crate::search::SearchRequest;
use crate::ExplorerError;

const CATEGORIES: [&str; 6] = ["Breakfast", "Lunch", "Dinner", "Dessert", "Vegan", "Vegetarian"];
const CUISINES: [&str; 7] = [
    "American", "Italian", "Mexican", "Indian", "Chinese", "French", "Thai",
];
const INGREDIENTS: [&str; 9] = [
    "chicken", "tomato", "garlic", "onion", "rice", "beef", "pepper", "cheese", "egg",
];

const PAGE_ITEMS: usize = 12;
const TOTAL_RESULTS: u64 = 120;

const CARD_CUISINES: [&str; 3] = ["Italian", "Mexican", "American"];
const CARD_CATEGORIES: [&str; 3] = ["Dinner", "Lunch", "Dessert"];

/// Synthetic catalog served when no backend is configured.
///
/// Output depends only on the request, so the demo mode behaves the same on
/// every run.
#[derive(Debug, Clone, Default)]
pub struct DemoRecipeApi {
    limits: ListLimits,
}

impl DemoRecipeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: ListLimits) -> Self {
        Self { limits }
    }

    fn card(request: &SearchRequest, i: usize) -> Recipe {
        Recipe {
            id: format!("{}-{}", request.page, i + 1),
            title: demo_title(request, i),
            description: Some(
                "A delicious recipe that is easy to cook and perfect for any occasion.".to_string(),
            ),
            image_url: Some(format!(
                "https://source.unsplash.com/800x600/?food,meal,{}",
                i + 3
            )),
            cuisine: Some(
                request
                    .cuisine
                    .clone()
                    .unwrap_or_else(|| CARD_CUISINES[i % 3].to_string()),
            ),
            category: Some(
                request
                    .category
                    .clone()
                    .unwrap_or_else(|| CARD_CATEGORIES[i % 3].to_string()),
            ),
            ready_in_minutes: Some(15 + (i as u32 % 5) * 10),
            ..Default::default()
        }
    }
}

#[async_trait]
impl RecipeApi for DemoRecipeApi {
    fn client_name(&self) -> &str {
        "demo"
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(capped(owned(&CATEGORIES), self.limits.categories))
    }

    async fn fetch_cuisines(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(capped(owned(&CUISINES), self.limits.cuisines))
    }

    async fn fetch_ingredients(&self) -> Result<Vec<String>, ExplorerError> {
        Ok(capped(owned(&INGREDIENTS), self.limits.ingredients))
    }

    async fn search_recipes(&self, request: &SearchRequest) -> Result<ResultPage, ExplorerError> {
        debug!("Serving demo results for page {}", request.page);
        let items = (0..PAGE_ITEMS).map(|i| Self::card(request, i)).collect();
        Ok(ResultPage {
            items,
            total: TOTAL_RESULTS,
        })
    }

    async fn get_recipe(&self, id: &str) -> Result<Recipe, ExplorerError> {
        Ok(demo_detail(id))
    }
}

/// `[cuisine] [ingredient] <query or "Chef"> Special <n>`
fn demo_title(request: &SearchRequest, i: usize) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if let Some(cuisine) = request.cuisine.as_deref() {
        parts.push(cuisine);
    }
    if let Some(ingredient) = request.ingredient.as_deref() {
        parts.push(ingredient);
    }
    parts.push(if request.q.is_empty() { "Chef" } else { request.q.as_str() });
    parts.push("Special");
    format!("{} {}", parts.join(" "), i + 1)
}

fn demo_detail(id: &str) -> Recipe {
    let ingredient = |quantity: &str, unit: &str, name: &str| IngredientEntry::Structured {
        quantity: Some(Amount::Text(quantity.to_string())),
        unit: Some(unit.to_string()).filter(|u| !u.is_empty()),
        name: Some(name.to_string()),
    };

    Recipe {
        id: id.to_string(),
        title: format!("Chef Special #{}", id),
        description: Some("A flavorful dish to satisfy your cravings.".to_string()),
        summary: Some("Rich, hearty, and ready in under 30 minutes.".to_string()),
        image_url: Some(format!(
            "https://source.unsplash.com/1000x800/?food,plate,{}",
            id
        )),
        category: Some("Dinner".to_string()),
        cuisine: Some("Italian".to_string()),
        ready_in_minutes: Some(30),
        servings: Some(4),
        ingredients: vec![
            ingredient("200", "g", "pasta"),
            ingredient("2", "cloves", "garlic"),
            ingredient("1", "cup", "tomato sauce"),
            ingredient("to taste", "", "salt & pepper"),
        ],
        instructions: Some(Instructions::Steps(vec![
            "Boil pasta in salted water until al dente.".to_string(),
            "Sauté garlic in olive oil until fragrant.".to_string(),
            "Add tomato sauce and simmer for 10 minutes.".to_string(),
            "Combine pasta and sauce, then serve hot.".to_string(),
        ])),
        instructions_text: None,
        nutrition: Some(Nutrition::Facts(NutritionFacts {
            calories: Some(Amount::Number(520.0)),
            protein: Some(Amount::Text("18g".to_string())),
            carbs: Some(Amount::Text("72g".to_string())),
            fat: Some(Amount::Text("16g".to_string())),
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchParams, SortMode};

    #[tokio::test]
    async fn test_search_always_returns_twelve_of_120() {
        let api = DemoRecipeApi::new();
        let requests = [
            SearchRequest::default(),
            SearchParams::parse("?q=chicken&category=Dinner&page=7&sort=time_desc").to_request(48),
            SearchParams::parse("?cuisine=Thai&ingredient=rice&maxReadyTime=10").to_request(6),
        ];

        for request in &requests {
            let page = api.search_recipes(request).await.unwrap();
            assert_eq!(page.items.len(), 12);
            assert_eq!(page.total, 120);
        }
    }

    #[tokio::test]
    async fn test_search_items_follow_request() {
        let api = DemoRecipeApi::new();
        let request = SearchRequest {
            q: "chicken".to_string(),
            cuisine: Some("Thai".to_string()),
            ingredient: Some("basil".to_string()),
            page: 2,
            sort: SortMode::TimeAsc,
            ..Default::default()
        };

        let page = api.search_recipes(&request).await.unwrap();
        let first = &page.items[0];
        assert_eq!(first.id, "2-1");
        assert_eq!(first.title, "Thai basil chicken Special 1");
        assert_eq!(first.cuisine.as_deref(), Some("Thai"));
        assert_eq!(first.category.as_deref(), Some("Dinner"));
        assert_eq!(first.ready_in_minutes, Some(15));

        let last = &page.items[11];
        assert_eq!(last.id, "2-12");
        assert_eq!(last.category.as_deref(), Some("Dessert"));
        assert_eq!(last.ready_in_minutes, Some(25));
    }

    #[tokio::test]
    async fn test_default_titles_use_chef() {
        let page = DemoRecipeApi::new()
            .search_recipes(&SearchRequest::default())
            .await
            .unwrap();
        assert_eq!(page.items[2].title, "Chef Special 3");
    }

    #[tokio::test]
    async fn test_detail_echoes_id() {
        let api = DemoRecipeApi::new();
        for id in ["1-3", "abc", "42"] {
            let recipe = api.get_recipe(id).await.unwrap();
            assert_eq!(recipe.id, id);
            assert!(recipe.title.contains("Special"));
            assert_eq!(recipe.ingredients.len(), 4);
            assert_eq!(recipe.steps().len(), 4);
        }
    }

    #[tokio::test]
    async fn test_lists_respect_limits() {
        let api = DemoRecipeApi::with_limits(ListLimits {
            categories: 2,
            cuisines: 50,
            ingredients: 3,
        });

        assert_eq!(
            api.fetch_categories().await.unwrap(),
            vec!["Breakfast", "Lunch"]
        );
        assert_eq!(api.fetch_cuisines().await.unwrap().len(), 7);
        assert_eq!(api.fetch_ingredients().await.unwrap().len(), 3);
    }
}
