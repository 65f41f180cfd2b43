use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ScrapeConfig;

/// Source of raw catalog markup.
pub trait PageFetcher {
    async fn fetch_page(&mut self, url: &Url) -> Result<String>;
}

/// Plain HTTP GET with browser-like headers. No retries.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid User-Agent header")?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language)
                .context("Invalid Accept-Language header")?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client })
    }

    async fn get_text(&self, url: &Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await?;
        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&mut self, url: &Url) -> Result<String> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
        spinner.set_message(format!("GET {}", url));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let start = Instant::now();
        let result = self.get_text(url).await;
        spinner.finish_and_clear();

        let body = result?;
        debug!(
            "Fetched {} ({} bytes in {}ms)",
            url,
            body.len(),
            start.elapsed().as_millis()
        );
        Ok(body)
    }
}
