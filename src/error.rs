use thiserror::Error;

/// Errors that can occur while scraping a recipe
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page could not be fetched (connection, timeout or non-2xx status)
    #[error("Failed to fetch URL: {0}")]
    Network(#[from] reqwest::Error),

    /// A JSON-LD block could not be parsed
    #[error("Malformed JSON-LD block: {0}")]
    Parse(#[from] serde_json::Error),

    /// The headless browser failed to launch, navigate or read the page
    #[error("Render failed: {0}")]
    Render(String),

    /// Neither the static page nor the rendered page contained a Recipe
    #[error("No Recipe found in any JSON-LD block")]
    RecipeNotFound,

    /// The token issuer refused to issue a token
    #[error("Token issue failed: {0}")]
    Token(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<chromiumoxide::error::CdpError> for ScrapeError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScrapeError::Render(err.to_string())
    }
}
