//! Code-list scraper — binary entrypoint.
//! Runs one scrape of the CMS CPT/HCPCS and NUCC taxonomy listings and
//! publishes the combined artifact, then exits.
//!
//! See `README.md` for configuration via environment variables.

use codelist_scraper::ScraperConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("codelist_scraper=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ScraperConfig::from_env();
    let report = codelist_scraper::run(&config).await;

    match serde_json::to_string_pretty(&report) {
        Ok(summary) => println!("{summary}"),
        Err(e) => eprintln!("failed to render run report: {e}"),
    }

    if !report.success {
        std::process::exit(1);
    }
}
