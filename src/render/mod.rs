//! Turning view state into something a person can look at.
//!
//! [`html`] produces the browser markup, [`text`] the terminal output. Both
//! share the formatting helpers below.

pub mod html;
pub mod text;

use reqwest::Url;

use crate::model::{Amount, IngredientEntry, Nutrition, Recipe};

const PLACEHOLDER_IMAGE: &str = "https://source.unsplash.com/800x600/";

/// `quantity unit name`, skipping the empty parts
pub fn format_ingredient(entry: &IngredientEntry) -> String {
    match entry {
        IngredientEntry::Text(text) => text.clone(),
        IngredientEntry::Structured {
            quantity,
            unit,
            name,
        } => {
            let quantity = quantity
                .as_ref()
                .filter(|q| !q.is_empty())
                .map(Amount::to_string);
            [quantity, unit.clone(), name.clone()]
                .into_iter()
                .flatten()
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        }
    }
}

/// `520 kcal • 18g protein • 72g carbs • 16g fat`
pub fn format_nutrition(nutrition: &Nutrition) -> String {
    match nutrition {
        Nutrition::Text(text) => text.clone(),
        Nutrition::Facts(facts) => {
            let parts = [
                (&facts.calories, "kcal"),
                (&facts.protein, "protein"),
                (&facts.carbs, "carbs"),
                (&facts.fat, "fat"),
            ];
            parts
                .iter()
                .filter_map(|(value, label)| {
                    value
                        .as_ref()
                        .filter(|v| !v.is_empty())
                        .map(|v| format!("{} {}", v, label))
                })
                .collect::<Vec<_>>()
                .join(" • ")
        }
    }
}

/// Badges shown on cards and in the overlay: category, cuisine, ready time
pub fn badges(recipe: &Recipe) -> Vec<String> {
    let mut badges = Vec::new();
    if let Some(category) = recipe.category.as_deref().filter(|c| !c.is_empty()) {
        badges.push(category.to_string());
    }
    if let Some(cuisine) = recipe.cuisine.as_deref().filter(|c| !c.is_empty()) {
        badges.push(cuisine.to_string());
    }
    if let Some(minutes) = recipe.ready_in_minutes {
        badges.push(format!("{} min", minutes));
    }
    badges
}

/// Recipe image, or a stock photo matched on the title
pub fn image_for(recipe: &Recipe) -> String {
    match recipe.image_url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => url.to_string(),
        None => placeholder_image(&recipe.title),
    }
}

fn placeholder_image(title: &str) -> String {
    let title = if title.trim().is_empty() {
        "Recipe"
    } else {
        title
    };
    match Url::parse(PLACEHOLDER_IMAGE) {
        Ok(mut url) => {
            url.set_query(Some(&format!("food,{}", title)));
            url.to_string()
        }
        Err(_) => PLACEHOLDER_IMAGE.to_string(),
    }
}
