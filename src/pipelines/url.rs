use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::extractors::{extract_linked_data, locate_recipe};
use crate::fetchers::{ChromiumRenderer, Renderer, RequestFetcher};
use crate::model::{NormalizedRecipe, RawPage};
use crate::normalizer::{normalize, CandidateRecipe};
use crate::token::TokenIssuer;
use chrono::Utc;
use log::{debug, error, info};
use serde::Serialize;
use serde_json::Value;

/// Body of the scrape endpoint. The failure body never says what went wrong.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ScrapeResponse {
    Success {
        recipe_data: NormalizedRecipe,
        token: String,
    },
    Failure {
        error: String,
    },
}

impl ScrapeResponse {
    pub fn internal_error() -> Self {
        ScrapeResponse::Failure {
            error: "Internal Server Error".to_string(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ScrapeResponse::Success { .. } => 200,
            ScrapeResponse::Failure { .. } => 500,
        }
    }
}

/// Scrapes a recipe from a URL
///
/// The pipeline:
/// 1. Fetches the static HTML with RequestFetcher
/// 2. Extracts every JSON-LD block and locates the Recipe
/// 3. If none is found, renders the page once with the Renderer and repeats step 2
/// 4. Normalizes the located Recipe
///
/// A fetch or render failure ends the scrape; nothing partial is returned.
pub struct RecipeScraper<R = ChromiumRenderer> {
    fetcher: RequestFetcher,
    renderer: R,
}

impl RecipeScraper<ChromiumRenderer> {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        Self::with_renderer(config, ChromiumRenderer::new(config))
    }
}

impl<R: Renderer> RecipeScraper<R> {
    pub fn with_renderer(config: &ScraperConfig, renderer: R) -> Result<Self, ScrapeError> {
        Ok(Self {
            fetcher: RequestFetcher::new(config)?,
            renderer,
        })
    }

    pub async fn scrape(&self, url: &str) -> Result<NormalizedRecipe, ScrapeError> {
        let page = self.fetcher.fetch(url).await?;
        let recipe = match locate_in(&page) {
            Some(recipe) => recipe,
            None => {
                info!("No Recipe in static HTML of {}, rendering", url);
                let rendered = self.renderer.render(url).await?;
                locate_in(&rendered).ok_or(ScrapeError::RecipeNotFound)?
            }
        };
        debug!("Located Recipe: {:#?}", recipe);

        Ok(normalize(
            CandidateRecipe::from_value(recipe),
            url,
            Utc::now(),
        ))
    }

    /// Scrape on behalf of `user_id` and build the response body.
    ///
    /// The token is issued before scraping starts; any error collapses into
    /// the generic failure body.
    pub async fn respond(
        &self,
        url: &str,
        user_id: &str,
        issuer: &dyn TokenIssuer,
    ) -> ScrapeResponse {
        let result = async {
            let token = issuer.issue(user_id)?;
            let recipe_data = self.scrape(url).await?;
            Ok::<_, ScrapeError>(ScrapeResponse::Success { recipe_data, token })
        }
        .await;

        result.unwrap_or_else(|e| {
            error!("Scrape of {} failed: {}", url, e);
            ScrapeResponse::internal_error()
        })
    }
}

fn locate_in(page: &RawPage) -> Option<Value> {
    locate_recipe(&extract_linked_data(&page.html))
}
