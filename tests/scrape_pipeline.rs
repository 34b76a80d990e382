// tests/scrape_pipeline.rs
use async_trait::async_trait;
use codelist_scraper::scrape::run_once;
use codelist_scraper::scrape::types::{CodeSource, RawRecord, Source};
use codelist_scraper::{FetchCause, SourceFetchError};

struct StaticSource {
    source: Source,
    rows: Vec<RawRecord>,
}

#[async_trait]
impl CodeSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceFetchError> {
        Ok(self.rows.clone())
    }
    fn source(&self) -> Source {
        self.source
    }
}

struct FailingSource {
    source: Source,
}

#[async_trait]
impl CodeSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<RawRecord>, SourceFetchError> {
        Err(SourceFetchError::new(
            self.source,
            FetchCause::Structure("expected table not found".to_string()),
        ))
    }
    fn source(&self) -> Source {
        self.source
    }
}

fn raw(code: &str, desc: &str) -> RawRecord {
    RawRecord {
        code: code.to_string(),
        description: desc.to_string(),
        category: None,
    }
}

#[tokio::test]
async fn output_is_source_grouped_in_fixed_order() {
    let sources: Vec<Box<dyn CodeSource>> = vec![
        Box::new(StaticSource {
            source: Source::Cms,
            rows: vec![raw("C1", "cms one"), raw("C2", "cms two")],
        }),
        Box::new(StaticSource {
            source: Source::Nucc,
            rows: vec![raw("N1", "nucc one")],
        }),
    ];

    let result = run_once(&sources).await;
    assert!(!result.all_failed());
    let tags: Vec<Source> = result.records.iter().map(|r| r.source).collect();
    assert_eq!(tags, vec![Source::Cms, Source::Cms, Source::Nucc]);
    let codes: Vec<&str> = result.records.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["C1", "C2", "N1"]);
}

#[tokio::test]
async fn one_failed_source_degrades_to_partial() {
    let sources: Vec<Box<dyn CodeSource>> = vec![
        Box::new(FailingSource {
            source: Source::Cms,
        }),
        Box::new(StaticSource {
            source: Source::Nucc,
            rows: vec![raw("N1", "nucc one"), raw("N2", "nucc two")],
        }),
    ];

    let result = run_once(&sources).await;
    assert!(!result.all_failed());
    assert_eq!(result.records.len(), 2);
    assert!(result.records.iter().all(|r| r.source == Source::Nucc));

    let cms = &result.sources[0];
    assert_eq!(cms.source, Source::Cms);
    assert!(cms.error.is_some());
    let nucc = &result.sources[1];
    assert_eq!(nucc.kept, 2);
    assert!(nucc.error.is_none());
}

#[tokio::test]
async fn both_failed_reports_run_level_failure() {
    let sources: Vec<Box<dyn CodeSource>> = vec![
        Box::new(FailingSource {
            source: Source::Cms,
        }),
        Box::new(FailingSource {
            source: Source::Nucc,
        }),
    ];

    let result = run_once(&sources).await;
    assert!(result.all_failed());
    assert!(result.records.is_empty());
    assert_eq!(result.sources.iter().filter(|s| s.error.is_some()).count(), 2);
}

#[tokio::test]
async fn empty_source_is_success_not_failure() {
    let sources: Vec<Box<dyn CodeSource>> = vec![Box::new(StaticSource {
        source: Source::Cms,
        rows: vec![],
    })];

    let result = run_once(&sources).await;
    assert!(!result.all_failed());
    assert!(result.records.is_empty());
    assert!(result.sources[0].error.is_none());
}
