use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Scraper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// User agent sent with the fast-path request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Fast-path request timeout in seconds; unset keeps the client default
    #[serde(default)]
    pub fetch_timeout: Option<u64>,
    /// Chromium executable for the render fallback; auto-detected when unset
    #[serde(default)]
    pub chrome_path: Option<PathBuf>,
    /// Run the fallback browser headless
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Address the HTTP service binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            fetch_timeout: None,
            chrome_path: None,
            headless: default_headless(),
            bind_address: default_bind_address(),
        }
    }
}

// Default value functions
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; RecipeScrapeBot/1.0)".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCRAPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCRAPE__FETCH_TIMEOUT
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_SCRAPE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout.map(Duration::from_secs)
    }
}
