// src/scrape/providers/mod.rs
pub mod cms;
pub mod nucc;

use reqwest::header;

use crate::error::FetchCause;
use crate::scrape::retry::RetryPolicy;

// Some gov pages reject the default reqwest UA.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// GET a page body, retrying transport errors and 5xx responses under the
/// injected policy. 4xx responses fail immediately.
pub(crate) async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    retry: RetryPolicy,
) -> Result<String, FetchCause> {
    let mut attempt: u8 = 0;
    loop {
        attempt += 1;
        let res = client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await;

        match res {
            Ok(resp) => {
                let status = resp.status();
                if status.is_success() {
                    return resp.text().await.map_err(FetchCause::Http);
                }
                if status.is_server_error() && attempt < retry.max_attempts {
                    tracing::warn!(url, %status, attempt, "server error, retrying");
                    tokio::time::sleep(retry.backoff(attempt)).await;
                    continue;
                }
                return Err(FetchCause::Status(status));
            }
            Err(e) => {
                if attempt < retry.max_attempts {
                    tracing::warn!(url, error = %e, attempt, "request error, retrying");
                    tokio::time::sleep(retry.backoff(attempt)).await;
                    continue;
                }
                return Err(FetchCause::Http(e));
            }
        }
    }
}

/// Collect the `<td>` texts of one `<tr>`.
pub(crate) fn row_cells(row: scraper::ElementRef<'_>) -> Vec<String> {
    let cell_sel = scraper::Selector::parse("td").unwrap();
    row.select(&cell_sel)
        .map(|c| c.text().collect::<String>())
        .collect()
}
