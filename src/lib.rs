// src/lib.rs
// Public library surface for integration tests (and the binary).

pub mod config;
pub mod error;
pub mod scrape;

// ---- Re-exports for stable public API ----
pub use crate::config::{Destination, ScraperConfig};
pub use crate::error::{
    ArtifactWriteError, FetchCause, NormalizeError, RunFailure, SourceFetchError,
};
pub use crate::scrape::runner::{run, RunReport, SourceSummary};
pub use crate::scrape::sink::ArtifactWriter;
pub use crate::scrape::types::{CodeSource, NormalizedRecord, RawRecord, Source};
