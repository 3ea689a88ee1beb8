use clap::{Args, Parser, Subcommand};
use log::debug;
use std::time::Duration;

use recipe_explorer::render::{html, text};
use recipe_explorer::{
    DetailState, ExplorerConfig, FilterSelection, RecipeExplorer, SearchField,
    SearchParams, SortMode,
};

#[derive(Parser)]
#[command(name = "recipe-explorer")]
#[command(about = "Search, filter and browse a recipe catalog", long_about = None)]
struct Cli {
    /// Backend base URL (overrides RECIPE_EXPLORER__API__BASE_URL)
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Use the built-in demo catalog even if a backend is configured
    #[arg(long, global = true)]
    demo: bool,

    /// Recipes per result page
    #[arg(long, global = true)]
    page_size: Option<u32>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes and print one page of results
    Search(SearchArgs),
    /// Show the full details of one recipe
    Show {
        /// Recipe id
        id: String,
    },
    /// Print the categories, cuisines and ingredients offered as filters
    Lists,
    /// Print the explorer page as HTML
    Render {
        #[command(flatten)]
        search: SearchArgs,
        /// Open the detail overlay for this recipe id
        #[arg(long)]
        open: Option<String>,
    },
}

#[derive(Args)]
struct SearchArgs {
    /// Start from a shared link or query string, e.g. "?q=soup&page=2"
    #[arg(long)]
    url: Option<String>,
    /// Free-text query
    #[arg(short, long)]
    query: Option<String>,
    /// What the query is aimed at
    #[arg(long, value_parser = parse_field)]
    field: Option<SearchField>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    cuisine: Option<String>,
    #[arg(long)]
    ingredient: Option<String>,
    /// Maximum ready time in minutes
    #[arg(long)]
    max_ready_time: Option<u32>,
    /// relevance, time_asc, time_desc or rating_desc
    #[arg(long, value_parser = parse_sort)]
    sort: Option<SortMode>,
    #[arg(short, long)]
    page: Option<u32>,
}

impl SearchArgs {
    /// Apply the flags on top of `--url` the same way the UI controls would
    fn to_params(&self) -> SearchParams {
        let mut params = SearchParams::parse(self.url.as_deref().unwrap_or(""));

        if self.query.is_some() || self.field.is_some() {
            let query = self.query.clone().unwrap_or_else(|| params.query_text().to_string());
            params = params.with_search(&query, self.field.unwrap_or_default());
        }
        if let Some(category) = &self.category {
            params = params.with_category(category);
        }
        if self.cuisine.is_some() || self.ingredient.is_some() || self.max_ready_time.is_some() {
            params = params.with_filters(&FilterSelection {
                cuisine: self.cuisine.clone().or(params.cuisine.clone()),
                ingredient: self.ingredient.clone().or(params.ingredient.clone()),
                max_ready_time: self.max_ready_time.or(params.max_ready_time),
                sort: self.sort,
            });
        } else if let Some(sort) = self.sort {
            params = params.with_sort(sort);
        }
        if let Some(page) = self.page {
            params = params.with_page(page);
        }
        params
    }
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    SortMode::from_param(value).ok_or_else(|| format!("unknown sort mode '{}'", value))
}

fn parse_field(value: &str) -> Result<SearchField, String> {
    SearchField::from_param(value).ok_or_else(|| format!("unknown search field '{}'", value))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let location = match &cli.command {
        Commands::Search(search) | Commands::Render { search, .. } => {
            search.to_params().to_string()
        }
        _ => String::new(),
    };
    debug!("Starting at location '{}'", location);

    let mut builder = RecipeExplorer::builder()
        .config(ExplorerConfig::load()?)
        .location(if location.is_empty() { "/" } else { location.as_str() });
    if let Some(base) = cli.api_base {
        builder = builder.api_base(base);
    }
    if cli.demo {
        builder = builder.demo();
    }
    if let Some(page_size) = cli.page_size {
        builder = builder.page_size(page_size);
    }
    if let Some(seconds) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }
    let explorer = builder.build()?;

    match cli.command {
        Commands::Search(_) => {
            explorer.refresh().await;
            let view = explorer.snapshot().await;
            println!("{}", explorer.href().await);
            print!("{}", text::results(&view));
            if view.results.error().is_some() {
                return Err("search failed".into());
            }
        }
        Commands::Show { id } => {
            explorer.open_recipe(&id).await;
            let view = explorer.snapshot().await;
            print!("{}", text::detail(&view.detail));
            if let DetailState::Failed { .. } = view.detail {
                return Err(format!("could not load recipe {}", id).into());
            }
        }
        Commands::Lists => {
            explorer.load_filter_lists().await;
            print!("{}", text::lists(&explorer.snapshot().await.lists));
        }
        Commands::Render { open, .. } => {
            tokio::join!(explorer.load_filter_lists(), explorer.refresh());
            if let Some(id) = open {
                explorer.open_recipe(&id).await;
            }
            println!("{}", html::page(&explorer.snapshot().await));
        }
    }

    Ok(())
}
