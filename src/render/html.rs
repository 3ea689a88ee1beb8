//! HTML fragments for the explorer page.
//!
//! Every piece of recipe or user text goes through `html_escape`; links are
//! built from [`SearchParams`] transitions so each one is a shareable URL.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use super::{badges, format_ingredient, format_nutrition, image_for};
use crate::detail::DetailState;
use crate::explorer::{ExplorerView, FilterLists};
use crate::model::Recipe;
use crate::results::{Pagination, ResultView, NO_RESULTS_MESSAGE};
use crate::search::{
    FilterSelection, SearchField, SearchParams, SortMode, KEY_CUISINE, KEY_FIELD, KEY_INGREDIENT,
    KEY_MAX_READY_TIME, KEY_QUERY, KEY_SORT,
};

pub fn recipe_card(recipe: &Recipe) -> String {
    let mut html = String::new();
    html.push_str("<article class=\"card\">");
    let _ = write!(
        html,
        "<div class=\"thumb\" style=\"background-image: url({})\" aria-label=\"{} image\"></div>",
        attr(&image_for(recipe)),
        attr(&recipe.title)
    );
    html.push_str("<div class=\"meta\"><div class=\"badges\">");
    for badge in badges(recipe) {
        let _ = write!(html, "<span class=\"badge\">{}</span>", text(&badge));
    }
    html.push_str("</div>");
    let _ = write!(html, "<h3 class=\"title\">{}</h3>", text(&recipe.title));
    if let Some(description) = recipe.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(html, "<p class=\"desc\">{}</p>", text(description));
    }
    html.push_str("</div>");
    let _ = write!(
        html,
        "<div class=\"button-row\"><button class=\"btn\" data-recipe-id=\"{}\">View Details</button></div>",
        attr(&recipe.id)
    );
    html.push_str("</article>");
    html
}

/// Result count, grid with alert/empty states, and the pager
pub fn results(results: &ResultView, params: &SearchParams, pagination: &Pagination) -> String {
    let mut html = String::from("<section>");
    let _ = write!(
        html,
        "<div class=\"toolbar\"><div class=\"result-count\">{}</div></div>",
        text(&results.result_count_text())
    );

    html.push_str("<div class=\"grid\" role=\"list\">");
    if let Some(error) = results.error() {
        let _ = write!(html, "<div role=\"alert\">{}</div>", text(error));
    }
    if results.is_empty() {
        let _ = write!(html, "<div>{}</div>", NO_RESULTS_MESSAGE);
    }
    for recipe in results.items() {
        let _ = write!(
            html,
            "<div role=\"listitem\">{}</div>",
            recipe_card(recipe)
        );
    }
    html.push_str("</div>");

    html.push_str(&pager(params, pagination));
    html.push_str("</section>");
    html
}

pub fn pager(params: &SearchParams, pagination: &Pagination) -> String {
    let total_pages = pagination.total_pages();
    if total_pages <= 1 {
        return String::new();
    }

    let mut html = String::from("<nav class=\"pager\" aria-label=\"Pages\">");
    if pagination.has_previous() {
        let _ = write!(
            html,
            "<a rel=\"prev\" href=\"{}\">Previous</a>",
            attr(&params.with_page(pagination.page - 1).to_string())
        );
    }
    let _ = write!(
        html,
        "<span class=\"page\">Page {} of {}</span>",
        pagination.page, total_pages
    );
    if pagination.has_next() {
        let _ = write!(
            html,
            "<a rel=\"next\" href=\"{}\">Next</a>",
            attr(&params.with_page(pagination.page + 1).to_string())
        );
    }
    html.push_str("</nav>");
    html
}

/// The detail overlay; empty when closed
pub fn modal(detail: &DetailState) -> String {
    if !detail.is_open() {
        return String::new();
    }

    let image = detail.recipe().map(image_for).unwrap_or_default();
    let mut html = String::from(
        "<div class=\"modal-backdrop\" role=\"dialog\" aria-modal=\"true\"><div class=\"modal\">",
    );
    html.push_str("<button class=\"close\" aria-label=\"Close\">✕</button>");
    let _ = write!(
        html,
        "<div class=\"media\" style=\"background-image: url({})\"></div>",
        attr(&image)
    );
    html.push_str("<div class=\"body\">");

    match detail {
        DetailState::Closed => {}
        DetailState::Loading { .. } => html.push_str("<div>Loading...</div>"),
        DetailState::Failed { message, .. } => {
            let _ = write!(html, "<div role=\"alert\">{}</div>", text(message));
        }
        DetailState::Loaded(recipe) => html.push_str(&recipe_body(recipe)),
    }

    html.push_str("</div></div></div>");
    html
}

fn recipe_body(recipe: &Recipe) -> String {
    let mut html = String::new();
    let _ = write!(html, "<h2>{}</h2>", text(&recipe.title));
    if let Some(blurb) = recipe.blurb() {
        let _ = write!(html, "<p class=\"sub\">{}</p>", text(blurb));
    }

    html.push_str("<div class=\"tags\">");
    for tag in badges(recipe) {
        let _ = write!(html, "<span class=\"tag\">{}</span>", text(&tag));
    }
    if let Some(servings) = recipe.servings {
        let _ = write!(html, "<span class=\"tag\">{} servings</span>", servings);
    }
    html.push_str("</div>");

    html.push_str("<div class=\"section\"><h4>Ingredients</h4>");
    if recipe.ingredients.is_empty() {
        html.push_str("<p>No ingredients listed.</p>");
    } else {
        html.push_str("<ul>");
        for entry in &recipe.ingredients {
            let _ = write!(html, "<li>{}</li>", text(&format_ingredient(entry)));
        }
        html.push_str("</ul>");
    }
    html.push_str("</div>");

    html.push_str("<div class=\"section\"><h4>Instructions</h4>");
    let steps = recipe.steps();
    if !steps.is_empty() {
        html.push_str("<ol>");
        for step in steps {
            let _ = write!(html, "<li>{}</li>", text(step));
        }
        html.push_str("</ol>");
    } else if let Some(body) = recipe.instructions_body() {
        let _ = write!(html, "<p>{}</p>", text(body));
    } else {
        html.push_str("<p>No instructions provided.</p>");
    }
    html.push_str("</div>");

    if let Some(nutrition) = &recipe.nutrition {
        let _ = write!(
            html,
            "<div class=\"section\"><h4>Nutrition</h4><p>{}</p></div>",
            text(&format_nutrition(nutrition))
        );
    }
    html
}

/// Category chips; each links to the URL selecting that category
pub fn category_chips(categories: &[String], params: &SearchParams) -> String {
    let active = params.effective_category();
    let mut html = String::from("<div class=\"category-scroll\" aria-label=\"Recipe categories\">");
    for category in categories {
        let class = if category == active { "chip active" } else { "chip" };
        let _ = write!(
            html,
            "<a class=\"{}\" href=\"{}\">{}</a>",
            class,
            attr(&params.with_category(category).to_string()),
            text(category)
        );
    }
    html.push_str("</div>");
    html
}

pub fn search_bar(params: &SearchParams) -> String {
    let mut html = String::from("<form class=\"searchbar\" role=\"search\" method=\"get\">");
    html.push_str(&hidden_inputs(
        &params.with_search("", SearchField::Keyword),
        &[KEY_QUERY, KEY_FIELD],
    ));
    let _ = write!(
        html,
        "<input name=\"q\" aria-label=\"Search\" placeholder=\"Search recipes by keyword, ingredient, or cuisine...\" value=\"{}\">",
        attr(params.query_text())
    );
    html.push_str("<select name=\"field\" aria-label=\"Search type\">");
    let current = params.effective_field();
    for field in SearchField::ALL {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            field.as_str(),
            selected(field == current),
            field.label()
        );
    }
    html.push_str("</select><button class=\"btn\" type=\"submit\">Search</button></form>");
    html
}

/// Cuisine, ingredient, ready time and sort controls
pub fn filters_sidebar(lists: &FilterLists, params: &SearchParams) -> String {
    let mut html = String::from("<form class=\"filters\" method=\"get\">");
    html.push_str(&hidden_inputs(
        &params.with_filters(&FilterSelection::default()),
        &[KEY_CUISINE, KEY_INGREDIENT, KEY_MAX_READY_TIME, KEY_SORT],
    ));

    let cuisine = params.cuisine.as_deref().unwrap_or("");
    html.push_str("<div class=\"filter-group\"><label>Cuisine</label><select name=\"cuisine\">");
    let _ = write!(
        html,
        "<option value=\"\"{}>Any</option>",
        selected(cuisine.is_empty())
    );
    for option in &lists.cuisines {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            attr(option),
            selected(option == cuisine),
            text(option)
        );
    }
    html.push_str("</select></div>");

    let _ = write!(
        html,
        "<div class=\"filter-group\"><label>Ingredient</label><input name=\"ingredient\" list=\"ingredient-list\" placeholder=\"e.g., chicken\" value=\"{}\"><datalist id=\"ingredient-list\">",
        attr(params.ingredient.as_deref().unwrap_or(""))
    );
    for option in &lists.ingredients {
        let _ = write!(html, "<option value=\"{}\">", attr(option));
    }
    html.push_str("</datalist></div>");

    let max_ready_time = params
        .max_ready_time
        .map(|minutes| minutes.to_string())
        .unwrap_or_default();
    let _ = write!(
        html,
        "<div class=\"filter-group\"><label>Max Ready Time (minutes)</label><input name=\"maxReadyTime\" type=\"number\" min=\"0\" placeholder=\"e.g., 30\" value=\"{}\"></div>",
        max_ready_time
    );

    html.push_str("<div class=\"filter-group\"><label>Sort by</label><select name=\"sort\">");
    let sort = params.effective_sort();
    for mode in SortMode::ALL {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            mode.as_str(),
            selected(mode == sort),
            mode.label()
        );
    }
    html.push_str("</select></div>");

    let _ = write!(
        html,
        "<div class=\"filter-actions\"><a class=\"btn-outline\" href=\"{}\">Reset</a><button class=\"btn-primary\" type=\"submit\">Apply</button></div>",
        attr(&params.reset_filters().to_string())
    );
    html.push_str("</form>");
    html
}

/// Complete document for one snapshot of the explorer
pub fn page(view: &ExplorerView) -> String {
    let mut html = String::from(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>Recipe Explorer</title></head><body><div class=\"app-shell\">",
    );

    html.push_str("<div class=\"navbar\"><div class=\"navbar-inner\">");
    html.push_str("<div class=\"brand\"><div class=\"logo\">🍽</div>Recipe Explorer</div>");
    html.push_str(&category_chips(&view.lists.categories, &view.params));
    html.push_str(&search_bar(&view.params));
    html.push_str("</div></div>");

    html.push_str("<main class=\"content\"><aside class=\"sidebar\" aria-label=\"Filters\"><h4>Filters</h4>");
    html.push_str(&filters_sidebar(&view.lists, &view.params));
    html.push_str("</aside>");
    html.push_str(&results(&view.results, &view.params, &view.pagination));
    html.push_str("</main>");

    html.push_str(
        "<footer class=\"footer\"><div class=\"footer-inner\">Recipe Explorer • Images from Unsplash</div></footer>",
    );
    html.push_str(&modal(&view.detail));
    html.push_str("</div></body></html>");
    html
}

/// Carries every key of `target` the form has no control for
fn hidden_inputs(target: &SearchParams, controlled: &[&str]) -> String {
    let mut html = String::new();
    for (key, value) in target.to_query().pairs() {
        if controlled.contains(&key) {
            continue;
        }
        let _ = write!(
            html,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            attr(key),
            attr(value)
        );
    }
    html
}

fn selected(is_selected: bool) -> &'static str {
    if is_selected {
        " selected"
    } else {
        ""
    }
}
