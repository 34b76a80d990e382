// src/scrape/runner.rs
use serde::Serialize;

use crate::config::ScraperConfig;
use crate::error::RunFailure;
use crate::scrape::providers::{cms::CmsSource, nucc::NuccSource};
use crate::scrape::sink::ArtifactWriter;
use crate::scrape::types::{CodeSource, Source};

/// What one run produced, for the caller to turn into an exit code or an
/// HTTP response. Serializable so the binary can print it as JSON.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub success: bool,
    pub total_records: usize,
    pub sources: Vec<SourceSummary>,
    /// Destination identifier (local path or `gs://bucket/key`) on success.
    pub artifact: Option<String>,
    /// Run-level error when the whole run failed.
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SourceSummary {
    pub source: Source,
    pub records: usize,
    pub dropped: usize,
    pub error: Option<String>,
}

/// Single entry operation: scrape both sources, then publish.
pub async fn run(config: &ScraperConfig) -> RunReport {
    let client = match reqwest::Client::builder().timeout(config.timeout).build() {
        Ok(c) => c,
        Err(e) => {
            return RunReport {
                success: false,
                total_records: 0,
                sources: Vec::new(),
                artifact: None,
                error: Some(format!("building http client: {e}")),
            }
        }
    };

    // CMS first: the combined sequence is source-grouped in this order.
    let sources: Vec<Box<dyn CodeSource>> = vec![
        Box::new(CmsSource::new(
            config.cms_url.clone(),
            client.clone(),
            config.retry,
        )),
        Box::new(NuccSource::new(
            config.nucc_url.clone(),
            client.clone(),
            config.retry,
        )),
    ];
    let writer = ArtifactWriter::new(config.destination.clone(), client, config.gcs_token.clone());

    execute(&sources, &writer).await
}

/// Aggregate then write. Split out from `run` so tests can inject mock
/// sources and a tempdir-backed writer.
pub async fn execute(sources: &[Box<dyn CodeSource>], writer: &ArtifactWriter) -> RunReport {
    let result = crate::scrape::run_once(sources).await;

    let summaries: Vec<SourceSummary> = result
        .sources
        .iter()
        .map(|s| SourceSummary {
            source: s.source,
            records: s.kept,
            dropped: s.dropped,
            error: s.error.as_ref().map(|e| e.to_string()),
        })
        .collect();

    if result.all_failed() {
        let failure = RunFailure {
            errors: result.sources.into_iter().filter_map(|s| s.error).collect(),
        };
        tracing::error!(error = %failure, "run failed, skipping artifact write");
        return RunReport {
            success: false,
            total_records: 0,
            sources: summaries,
            artifact: None,
            error: Some(failure.to_string()),
        };
    }

    match writer.write(&result.records).await {
        Ok(destination) => {
            tracing::info!(
                destination = %destination,
                records = result.records.len(),
                "run complete"
            );
            RunReport {
                success: true,
                total_records: result.records.len(),
                sources: summaries,
                artifact: Some(destination),
                error: None,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "artifact write failed");
            RunReport {
                success: false,
                total_records: result.records.len(),
                sources: summaries,
                artifact: None,
                error: Some(e.to_string()),
            }
        }
    }
}
