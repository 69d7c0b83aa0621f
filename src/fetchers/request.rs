use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::model::RawPage;
use log::debug;
use reqwest::Client;

/// Fast path: fetches the server-delivered HTML with a plain GET.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.fetch_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Fetch `url`, failing on connection errors, timeouts and non-2xx statuses.
    pub async fn fetch(&self, url: &str) -> Result<RawPage, ScrapeError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        debug!("RequestFetcher: {} responded {}", url, response.status());
        let html = response.text().await?;

        Ok(RawPage {
            url: url.to_string(),
            html,
        })
    }
}
