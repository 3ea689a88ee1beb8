use std::fmt::Write;

use super::{badges, format_ingredient, format_nutrition};
use crate::detail::DetailState;
use crate::explorer::{ExplorerView, FilterLists};
use crate::model::Recipe;
use crate::results::NO_RESULTS_MESSAGE;

/// Result count, one line per recipe, and the page position
pub fn results(view: &ExplorerView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.results.result_count_text());

    if let Some(error) = view.results.error() {
        let _ = writeln!(out, "{}", error);
    } else if view.results.is_empty() {
        let _ = writeln!(out, "{}", NO_RESULTS_MESSAGE);
    }

    for recipe in view.results.items() {
        let badges = badges(recipe);
        if badges.is_empty() {
            let _ = writeln!(out, "  [{}] {}", recipe.id, recipe.title);
        } else {
            let _ = writeln!(
                out,
                "  [{}] {} ({})",
                recipe.id,
                recipe.title,
                badges.join(", ")
            );
        }
    }

    let pages = view.pagination.total_pages();
    if pages > 1 {
        let _ = writeln!(out, "Page {} of {}", view.pagination.page, pages);
    }
    out
}

pub fn recipe(recipe: &Recipe) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", recipe.title);
    if let Some(blurb) = recipe.blurb() {
        let _ = writeln!(out, "{}", blurb);
    }

    let mut tags = badges(recipe);
    if let Some(servings) = recipe.servings {
        tags.push(format!("{} servings", servings));
    }
    if !tags.is_empty() {
        let _ = writeln!(out, "{}", tags.join(" | "));
    }

    let _ = writeln!(out, "\nIngredients");
    if recipe.ingredients.is_empty() {
        let _ = writeln!(out, "  No ingredients listed.");
    }
    for entry in &recipe.ingredients {
        let _ = writeln!(out, "  - {}", format_ingredient(entry));
    }

    let _ = writeln!(out, "\nInstructions");
    let steps = recipe.steps();
    if !steps.is_empty() {
        for (n, step) in steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", n + 1, step);
        }
    } else if let Some(body) = recipe.instructions_body() {
        let _ = writeln!(out, "  {}", body);
    } else {
        let _ = writeln!(out, "  No instructions provided.");
    }

    if let Some(nutrition) = &recipe.nutrition {
        let _ = writeln!(out, "\nNutrition\n  {}", format_nutrition(nutrition));
    }
    out
}

pub fn detail(detail: &DetailState) -> String {
    match detail {
        DetailState::Closed => String::new(),
        DetailState::Loading { id } => format!("Loading {}...\n", id),
        DetailState::Failed { message, .. } => format!("{}\n", message),
        DetailState::Loaded(loaded) => recipe(loaded),
    }
}

pub fn lists(lists: &FilterLists) -> String {
    let mut out = String::new();
    for (name, values) in [
        ("Categories", &lists.categories),
        ("Cuisines", &lists.cuisines),
        ("Ingredients", &lists.ingredients),
    ] {
        let _ = writeln!(out, "{} ({}): {}", name, values.len(), values.join(", "));
    }
    out
}
