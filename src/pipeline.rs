use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::book::BookRecord;
use crate::config::ScrapeConfig;
use crate::fetch::PageFetcher;
use crate::output;
use crate::parser;

/// Whether pagination goes on after a page has been parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Continue,
    Stop,
}

/// An empty page past the first one marks the end of the catalog.
/// Page 1 never stops the run, even when empty.
pub fn next_step(page: u32, records_found: usize) -> PageStep {
    if records_found == 0 && page > 1 {
        PageStep::Stop
    } else {
        PageStep::Continue
    }
}

/// Result of a scrape run.
#[derive(Debug)]
pub struct ScrapeReport {
    /// Records in fetch order.
    pub books: Vec<BookRecord>,
    pub pages_fetched: u32,
    pub pauses: u32,
}

/// Fetch catalog pages one at a time and collect every parsed record.
///
/// Transport errors abort the run.
pub async fn collect_books<F: PageFetcher>(
    config: &ScrapeConfig,
    fetcher: &mut F,
) -> Result<ScrapeReport> {
    let mut books = Vec::new();
    let mut pages_fetched = 0;
    let mut pauses = 0;

    for page in 1..=config.max_pages {
        let url = config.page_url(page);
        info!("Fetching page {}: {}", page, url);

        let html = fetcher
            .fetch_page(&url)
            .await
            .with_context(|| format!("Failed to fetch page {} ({})", page, url))?;
        pages_fetched += 1;

        let found = parser::parse_catalog_page(&html);
        if next_step(page, found.len()) == PageStep::Stop {
            info!("Page {} has no books, stopping", page);
            break;
        }

        let count = found.len();
        books.extend(found);
        println!("Collected {} books from page {}. Total: {}", count, page, books.len());

        if page < config.max_pages {
            println!("Pausing...");
            debug!("Sleeping {:.1}s before page {}", config.delay.as_secs_f64(), page + 1);
            tokio::time::sleep(config.delay).await;
            pauses += 1;
        }
    }

    Ok(ScrapeReport {
        books,
        pages_fetched,
        pauses,
    })
}

/// Full run: collect, sort, and write the CSV. Nothing is written when no
/// books were found.
pub async fn scrape_to_csv<F: PageFetcher>(
    config: &ScrapeConfig,
    fetcher: &mut F,
) -> Result<ScrapeReport> {
    let mut report = collect_books(config, fetcher).await?;
    info!(
        "Fetched {} page(s) with {} pause(s)",
        report.pages_fetched, report.pauses
    );
    if report.books.is_empty() {
        warn!("No books collected after {} page(s)", report.pages_fetched);
        println!("No data was collected.");
        return Ok(report);
    }

    sort_books(&mut report.books);
    output::write_books(&config.output, &report.books)?;
    println!("Saved {} books to {}", report.books.len(), config.output.display());
    Ok(report)
}

/// Ascending by lowercase title. Equal titles keep their fetch order.
pub fn sort_books(books: &mut [BookRecord]) {
    books.sort_by_cached_key(|b| b.title.to_lowercase());
}
