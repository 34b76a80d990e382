// src/scrape/types.rs
use serde::{Deserialize, Serialize};

use crate::error::SourceFetchError;

/// Which origin produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Cms,
    Nucc,
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Cms => f.write_str("cms"),
            Source::Nucc => f.write_str("nucc"),
        }
    }
}

/// Source-shaped intermediate scraped from one table row. Lives only
/// between fetch and normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub code: String,
    pub description: String,
    pub category: Option<String>,
}

/// The unified record shape persisted to the artifact. Optional fields
/// serialize as explicit `null`; exactly one of `taxonomy_code` /
/// `cpt_code` is populated, matching `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub source: Source,
    pub code: String,
    pub description: String,
    pub category: Option<String>,
    pub taxonomy_code: Option<String>,
    pub cpt_code: Option<String>,
}

#[async_trait::async_trait]
pub trait CodeSource: Send + Sync {
    /// Fetch and parse the full listing. Empty and failed are distinct:
    /// a reachable page with no data rows is `Ok(vec![])`.
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceFetchError>;
    fn source(&self) -> Source;
}

/// Per-source outcome of one aggregation pass.
#[derive(Debug)]
pub struct SourceReport {
    pub source: Source,
    /// Raw rows the fetcher yielded (0 when the fetch failed).
    pub fetched: usize,
    /// Rows that survived normalization.
    pub kept: usize,
    /// Rows dropped for missing code/description.
    pub dropped: usize,
    pub error: Option<SourceFetchError>,
}

/// One run's combined output, consumed by the artifact writer.
#[derive(Debug)]
pub struct RunResult {
    pub records: Vec<NormalizedRecord>,
    pub sources: Vec<SourceReport>,
}

impl RunResult {
    pub fn all_failed(&self) -> bool {
        !self.sources.is_empty() && self.sources.iter().all(|s| s.error.is_some())
    }
}
