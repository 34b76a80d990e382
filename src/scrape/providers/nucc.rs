// src/scrape/providers/nucc.rs
use scraper::{Html, Selector};

use crate::error::{FetchCause, SourceFetchError};
use crate::scrape::providers::{fetch_page, row_cells};
use crate::scrape::retry::RetryPolicy;
use crate::scrape::types::{CodeSource, RawRecord, Source};

pub const DEFAULT_URL: &str = "https://taxonomy.nucc.org/";

/// The NUCC taxonomy listing lays rows out as
/// code | classification | specialization, with the third column optional.
pub struct NuccSource {
    url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl NuccSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self {
            url: url.into(),
            client,
            retry,
        }
    }
}

/// Parse taxonomy rows out of a page body. The specialization cell, when
/// present, becomes the category; normalization later drops it if blank.
pub fn parse_taxonomy(html: &str) -> Result<Vec<RawRecord>, FetchCause> {
    let doc = Html::parse_document(html);
    let table_sel = Selector::parse("table").unwrap();
    let row_sel = Selector::parse("tr").unwrap();

    let mut out = Vec::new();
    let mut saw_table = false;
    for table in doc.select(&table_sel) {
        saw_table = true;
        for row in table.select(&row_sel) {
            let cells = row_cells(row);
            if cells.len() < 2 {
                continue;
            }
            out.push(RawRecord {
                code: cells[0].clone(),
                description: cells[1].clone(),
                category: cells.get(2).cloned(),
            });
        }
    }

    if !saw_table {
        return Err(FetchCause::Structure(
            "no <table> found in NUCC taxonomy listing".to_string(),
        ));
    }
    Ok(out)
}

#[async_trait::async_trait]
impl CodeSource for NuccSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceFetchError> {
        let body = fetch_page(&self.client, &self.url, self.retry)
            .await
            .map_err(|cause| SourceFetchError::new(Source::Nucc, cause))?;
        parse_taxonomy(&body).map_err(|cause| SourceFetchError::new(Source::Nucc, cause))
    }

    fn source(&self) -> Source {
        Source::Nucc
    }
}
