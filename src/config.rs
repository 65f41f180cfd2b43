use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_BASE_URL: &str =
    "https://www.chitai-gorod.ru/catalog/books/povesti-i-rasskazy-dlya-detej-110095";
pub const DEFAULT_MAX_PAGES: u32 = 3;
pub const DEFAULT_OUTPUT: &str = "chitai_gorod_books_updated.csv";
pub const DEFAULT_DELAY_SECS: u64 = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7";

/// Everything a scrape run needs to know.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    pub base_url: Url,
    pub max_pages: u32,
    pub output: PathBuf,
    /// Pause between consecutive page fetches.
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    pub accept_language: String,
}

impl ScrapeConfig {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        Ok(Self {
            base_url,
            max_pages: DEFAULT_MAX_PAGES,
            output: PathBuf::from(DEFAULT_OUTPUT),
            delay: Duration::from_secs(DEFAULT_DELAY_SECS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        })
    }

    /// URL of catalog page `page` (1-based). Any query on the base URL is kept.
    pub fn page_url(&self, page: u32) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut().append_pair("page", &page.to_string());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ScrapeConfig::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(cfg.max_pages, 3);
        assert_eq!(cfg.delay, Duration::from_secs(2));
        assert_eq!(cfg.output, PathBuf::from("chitai_gorod_books_updated.csv"));
    }

    #[test]
    fn page_urls() {
        let cfg = ScrapeConfig::new("https://shop.example/catalog/books").unwrap();
        assert_eq!(cfg.page_url(1).as_str(), "https://shop.example/catalog/books?page=1");
        assert_eq!(cfg.page_url(12).as_str(), "https://shop.example/catalog/books?page=12");
    }

    #[test]
    fn page_url_keeps_existing_query() {
        let cfg = ScrapeConfig::new("https://shop.example/catalog?sort=new").unwrap();
        assert_eq!(cfg.page_url(2).as_str(), "https://shop.example/catalog?sort=new&page=2");
    }

    #[test]
    fn rejects_relative_base() {
        assert!(ScrapeConfig::new("catalog/books").is_err());
    }
}
