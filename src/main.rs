mod book;
mod config;
mod fetch;
mod output;
mod parser;
mod pipeline;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;

use config::ScrapeConfig;

#[derive(Parser)]
#[command(name = "catalog_scraper", about = "Scrape book cards from a paginated catalog into CSV")]
struct Cli {
    /// Catalog URL; pages are requested as <URL>?page=N
    #[arg(long, default_value = config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Max pages to fetch
    #[arg(
        short = 'n',
        long,
        default_value_t = config::DEFAULT_MAX_PAGES,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    max_pages: u32,

    /// Output CSV file
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Seconds to wait between page fetches
    #[arg(long, default_value_t = config::DEFAULT_DELAY_SECS)]
    delay: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = config::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[arg(long, default_value = config::DEFAULT_USER_AGENT)]
    user_agent: String,

    #[arg(long, default_value = config::DEFAULT_ACCEPT_LANGUAGE)]
    accept_language: String,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<ScrapeConfig> {
        let mut cfg = ScrapeConfig::new(&self.base_url)?;
        cfg.max_pages = self.max_pages;
        cfg.output = self.output;
        cfg.delay = Duration::from_secs(self.delay);
        cfg.timeout = Duration::from_secs(self.timeout);
        cfg.user_agent = self.user_agent;
        cfg.accept_language = self.accept_language;
        Ok(cfg)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let config = Cli::parse().into_config()?;
    println!("{}", config.base_url);

    let mut fetcher = fetch::HttpFetcher::new(&config)?;
    let report = pipeline::scrape_to_csv(&config, &mut fetcher).await?;

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!(
            "\nDone in {} ({} pages, {} books)",
            format_duration(elapsed),
            report.pages_fetched,
            report.books.len()
        );
    }

    Ok(())
}

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_config_defaults() {
        let cfg = Cli::parse_from(["catalog_scraper"]).into_config().unwrap();
        assert_eq!(cfg.base_url.as_str(), config::DEFAULT_BASE_URL);
        assert_eq!(cfg.max_pages, 3);
        assert_eq!(cfg.delay, Duration::from_secs(2));
        assert_eq!(cfg.timeout, Duration::from_secs(15));
    }

    #[test]
    fn cli_overrides() {
        let cfg = Cli::parse_from([
            "catalog_scraper",
            "--base-url",
            "https://shop.example/catalog",
            "-n",
            "7",
            "-o",
            "out.csv",
            "--delay",
            "0",
        ])
        .into_config()
        .unwrap();
        assert_eq!(cfg.max_pages, 7);
        assert_eq!(cfg.output, PathBuf::from("out.csv"));
        assert_eq!(cfg.delay, Duration::ZERO);
    }

    #[test]
    fn zero_pages_rejected() {
        assert!(Cli::try_parse_from(["catalog_scraper", "-n", "0"]).is_err());
    }

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
