// src/scrape/providers/cms.rs
use scraper::{Html, Selector};

use crate::error::{FetchCause, SourceFetchError};
use crate::scrape::providers::{fetch_page, row_cells};
use crate::scrape::retry::RetryPolicy;
use crate::scrape::types::{CodeSource, RawRecord, Source};

pub const DEFAULT_URL: &str =
    "https://www.cms.gov/medicare/regulations-guidance/physician-self-referral/list-cpt-hcpcs-codes";

/// The CMS listing groups CPT/HCPCS codes into plain tables:
/// code | description. Every table on the page is walked; rows without at
/// least two cells (headers, separators) are skipped.
pub struct CmsSource {
    url: String,
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl CmsSource {
    pub fn new(url: impl Into<String>, client: reqwest::Client, retry: RetryPolicy) -> Self {
        Self {
            url: url.into(),
            client,
            retry,
        }
    }
}

/// Parse the CPT/HCPCS listing out of a page body. A document with no
/// `<table>` is a structure mismatch, not an empty result.
pub fn parse_codes(html: &str) -> Result<Vec<RawRecord>, FetchCause> {
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
                category: Some("CPT/HCPCS".to_string()),
            });
        }
    }

    if !saw_table {
        return Err(FetchCause::Structure(
            "no <table> found in CMS code listing".to_string(),
        ));
    }
    Ok(out)
}

#[async_trait::async_trait]
impl CodeSource for CmsSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceFetchError> {
        let body = fetch_page(&self.client, &self.url, self.retry)
            .await
            .map_err(|cause| SourceFetchError::new(Source::Cms, cause))?;
        parse_codes(&body).map_err(|cause| SourceFetchError::new(Source::Cms, cause))
    }

    fn source(&self) -> Source {
        Source::Cms
    }
}
