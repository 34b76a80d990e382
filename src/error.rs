// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::scrape::types::Source;

/// A whole-source fetch failure: the tagged source plus what went wrong.
/// Row-level problems never produce this; they are handled in normalization.
#[derive(Debug, Error)]
#[error("{source} fetch failed: {cause}")]
pub struct SourceFetchError {
    pub source: Source,
    #[source]
    pub cause: FetchCause,
}

impl SourceFetchError {
    pub fn new(source: Source, cause: FetchCause) -> Self {
        Self { source, cause }
    }
}

#[derive(Debug, Error)]
pub enum FetchCause {
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("page structure mismatch: {0}")]
    Structure(String),
}

/// Row-level normalization failure. Non-fatal: the row is dropped and
/// counted, never escalated past the batch helper.
// Not derived: thiserror would treat the `source` field (a `Source` tag,
// not an error) as the Error::source, which does not compile.
#[derive(Debug)]
pub struct NormalizeError {
    pub source: Source,
    pub field: &'static str,
}

impl std::fmt::Display for NormalizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} row missing required field `{}`", self.source, self.field)
    }
}

impl std::error::Error for NormalizeError {}

#[derive(Debug, Error)]
pub enum ArtifactWriteError {
    #[error("local write to {path}: {cause}")]
    Local {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },

    #[error("remote upload of {key} to bucket {bucket}: {cause}")]
    Remote {
        bucket: String,
        key: String,
        #[source]
        cause: anyhow::Error,
    },

    #[error("serializing artifact: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Both sources failed; nothing to publish.
#[derive(Debug, Error)]
#[error("all sources failed: {}", format_errors(.errors))]
pub struct RunFailure {
    pub errors: Vec<SourceFetchError>,
}

fn format_errors(errors: &[SourceFetchError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
