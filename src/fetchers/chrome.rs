//! Render fallback backed by a locally launched headless Chromium.

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::model::RawPage;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use log::{debug, warn};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::task::JoinHandle;

/// Produces the fully rendered DOM of a page, client-side script included.
#[async_trait]
pub trait Renderer: Send + Sync {
    async fn render(&self, url: &str) -> Result<RawPage, ScrapeError>;
}

/// Launches a fresh Chromium for every render and closes it before returning.
pub struct ChromiumRenderer {
    chrome_path: Option<PathBuf>,
    headless: bool,
}

impl ChromiumRenderer {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            chrome_path: config.chrome_path.clone(),
            headless: config.headless,
        }
    }

    fn browser_config(&self, profile_dir: &Path) -> Result<BrowserConfig, ScrapeError> {
        let mut builder = BrowserConfig::builder()
            .user_data_dir(profile_dir)
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !self.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(ScrapeError::Render)
    }
}

/// Each render gets its own profile so concurrent browsers never share a lock.
fn new_profile() -> Result<TempDir, ScrapeError> {
    tempfile::Builder::new()
        .prefix("recipe-scrape-")
        .tempdir()
        .map_err(|e| ScrapeError::Render(format!("could not create browser profile: {}", e)))
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn render(&self, url: &str) -> Result<RawPage, ScrapeError> {
        let profile = new_profile()?;
        let config = self.browser_config(profile.path())?;

        let session = BrowserSession::launch(config, profile).await?;
        let outcome = session.rendered_html(url).await;
        session.close().await;

        Ok(RawPage {
            url: url.to_string(),
            html: outcome?,
        })
    }
}

/// A running browser, the task driving its DevTools connection and the
/// profile directory it writes to.
///
/// [`BrowserSession::close`] shuts Chromium down cleanly. A session that is
/// dropped without it (an early return, a cancelled future) still stops the
/// handler task, kills the browser and removes the profile.
struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    // Declared last: the directory goes only after the browser is gone.
    profile: TempDir,
}

impl BrowserSession {
    /// The profile is owned by the session from here on; if Chromium fails to
    /// start it is removed on the way out.
    async fn launch(config: BrowserConfig, profile: TempDir) -> Result<Self, ScrapeError> {
        let (browser, mut handler) = Browser::launch(config).await?;
        debug!(
            "BrowserSession: launched Chromium with profile {}",
            profile.path().display()
        );

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            handler,
            profile,
        })
    }

    /// Navigate, wait for the load event and return the live DOM as HTML.
    async fn rendered_html(&self, url: &str) -> Result<String, ScrapeError> {
        let page = self.browser.new_page("about:blank").await?;
        page.goto(url).await?;
        let html = page.content().await?;
        debug!("BrowserSession: rendered {} ({} bytes)", url, html.len());
        Ok(html)
    }

    async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("BrowserSession: close failed: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            warn!("BrowserSession: waiting for Chromium to exit failed: {}", e);
        }
        debug!("BrowserSession: closed");
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        self.handler.abort();
        debug!(
            "BrowserSession: releasing profile {}",
            self.profile.path().display()
        );
    }
}
