//! Scrape schema.org recipes from web pages.
//!
//! The static HTML is tried first; pages that only inject their JSON-LD from
//! client-side script are rendered in a headless Chromium.

pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod normalizer;
pub mod pipelines;
pub mod server;
pub mod token;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use model::NormalizedRecipe;
pub use pipelines::{RecipeScraper, ScrapeResponse};
pub use token::{OpaqueTokenIssuer, TokenIssuer};

/// Scrape `url` with configuration loaded from `config.toml` and the environment.
pub async fn fetch_recipe(url: &str) -> Result<NormalizedRecipe, ScrapeError> {
    let config = ScraperConfig::load()?;
    RecipeScraper::new(&config)?.scrape(url).await
}
