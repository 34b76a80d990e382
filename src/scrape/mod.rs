// src/scrape/mod.rs
pub mod providers;
pub mod retry;
pub mod runner;
pub mod sink;
pub mod types;

use crate::error::NormalizeError;
use crate::scrape::types::{CodeSource, NormalizedRecord, RawRecord, RunResult, Source, SourceReport};

/// Clean scraped cell text: collapse whitespace runs, trim. Idempotent.
pub fn clean_text(s: &str) -> String {
    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    re_ws.replace_all(s, " ").trim().to_string()
}

/// Pure mapping from a source-shaped row into the unified record shape.
/// Code or description empty after cleaning means the row is unusable.
pub fn normalize(source: Source, raw: &RawRecord) -> Result<NormalizedRecord, NormalizeError> {
    let code = clean_text(&raw.code);
    if code.is_empty() {
        return Err(NormalizeError { source, field: "code" });
    }
    let description = clean_text(&raw.description);
    if description.is_empty() {
        return Err(NormalizeError {
            source,
            field: "description",
        });
    }
    let category = raw
        .category
        .as_deref()
        .map(clean_text)
        .filter(|c| !c.is_empty());

    let (taxonomy_code, cpt_code) = match source {
        Source::Cms => (None, Some(code.clone())),
        Source::Nucc => (Some(code.clone()), None),
    };

    Ok(NormalizedRecord {
        source,
        code,
        description,
        category,
        taxonomy_code,
        cpt_code,
    })
}

/// Normalize a fetched batch, dropping unusable rows instead of failing.
/// Returns (kept records, dropped count).
pub fn normalize_all(source: Source, raw: Vec<RawRecord>) -> (Vec<NormalizedRecord>, usize) {
    let mut kept = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;
    for row in &raw {
        match normalize(source, row) {
            Ok(rec) => kept.push(rec),
            Err(e) => {
                tracing::debug!(source = %source, field = e.field, "dropping malformed row");
                dropped += 1;
            }
        }
    }
    (kept, dropped)
}

/// Run every source once, in the given order, buffering each source's
/// normalized output so the combined sequence stays source-grouped and
/// deterministic. A failed source is recorded, not propagated.
pub async fn run_once(sources: &[Box<dyn CodeSource>]) -> RunResult {
    let mut records = Vec::new();
    let mut reports = Vec::with_capacity(sources.len());

    for src in sources {
        let tag = src.source();
        match src.fetch().await {
            Ok(raw) => {
                let fetched = raw.len();
                let (mut kept, dropped) = normalize_all(tag, raw);
                tracing::info!(source = %tag, fetched, kept = kept.len(), dropped, "source scraped");
                reports.push(SourceReport {
                    source: tag,
                    fetched,
                    kept: kept.len(),
                    dropped,
                    error: None,
                });
                records.append(&mut kept);
            }
            Err(e) => {
                tracing::warn!(source = %tag, error = %e, "source fetch failed");
                reports.push(SourceReport {
                    source: tag,
                    fetched: 0,
                    kept: 0,
                    dropped: 0,
                    error: Some(e),
                });
            }
        }
    }

    RunResult {
        records,
        sources: reports,
    }
}
