use log::error;
use recipe_scrape::server::{self, AppState};
use recipe_scrape::{OpaqueTokenIssuer, RecipeScraper, ScraperConfig};
use std::env;
use std::sync::Arc;

const USAGE: &str = "Usage: recipe-scrape <url> | recipe-scrape serve";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).ok_or(USAGE)?;
    let config = ScraperConfig::load()?;
    let scraper = RecipeScraper::new(&config)?;

    if command == "serve" {
        let state = Arc::new(AppState {
            scraper,
            issuer: Box::new(OpaqueTokenIssuer),
        });
        return server::serve(&config, state).await;
    }

    match scraper.scrape(command).await {
        Ok(recipe) => {
            println!("{}", serde_json::to_string_pretty(&recipe)?);
            Ok(())
        }
        Err(e) => {
            error!("Unable to scrape a recipe from {}: {}", command, e);
            Err(e.into())
        }
    }
}
