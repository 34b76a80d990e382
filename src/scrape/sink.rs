// src/scrape/sink.rs
use chrono::{DateTime, Utc};
use reqwest::header;

use crate::config::Destination;
use crate::error::ArtifactWriteError;
use crate::scrape::types::NormalizedRecord;

const GCS_UPLOAD_BASE: &str = "https://storage.googleapis.com/upload/storage/v1";

/// Writes one artifact per invocation to the destination resolved at run
/// start. Never appends to or mutates a prior artifact; a name collision
/// (two runs in the same second) overwrites.
pub struct ArtifactWriter {
    dest: Destination,
    client: reqwest::Client,
    token: Option<String>,
    upload_base: String,
}

impl ArtifactWriter {
    pub fn new(dest: Destination, client: reqwest::Client, token: Option<String>) -> Self {
        Self {
            dest,
            client,
            token,
            upload_base: GCS_UPLOAD_BASE.to_string(),
        }
    }

    /// Point uploads at a different endpoint (a local GCS emulator).
    pub fn with_upload_base(mut self, base: impl Into<String>) -> Self {
        self.upload_base = base.into();
        self
    }

    /// Serialize and persist the record set. Returns the destination
    /// identifier: a local path or `gs://bucket/key`.
    pub async fn write(&self, records: &[NormalizedRecord]) -> Result<String, ArtifactWriteError> {
        let body = serde_json::to_vec_pretty(records)?;
        let name = artifact_name(Utc::now());

        match &self.dest {
            Destination::Local { dir } => {
                std::fs::create_dir_all(dir).map_err(|cause| ArtifactWriteError::Local {
                    path: dir.clone(),
                    cause,
                })?;
                let path = dir.join(&name);
                std::fs::write(&path, &body).map_err(|cause| ArtifactWriteError::Local {
                    path: path.clone(),
                    cause,
                })?;
                tracing::info!(path = %path.display(), records = records.len(), "artifact written locally");
                Ok(path.display().to_string())
            }
            Destination::Remote { bucket, prefix } => {
                let key = object_key(prefix, &name);
                let url = format!("{}/b/{bucket}/o", self.upload_base);
                // The object name goes through reqwest's query encoder so
                // prefixes with reserved characters survive intact.
                let mut req = self
                    .client
                    .post(&url)
                    .query(&[("uploadType", "media"), ("name", key.as_str())])
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body);
                if let Some(token) = &self.token {
                    req = req.bearer_auth(token);
                }
                let resp = req.send().await.map_err(|e| ArtifactWriteError::Remote {
                    bucket: bucket.clone(),
                    key: key.clone(),
                    cause: e.into(),
                })?;
                resp.error_for_status()
                    .map_err(|e| ArtifactWriteError::Remote {
                        bucket: bucket.clone(),
                        key: key.clone(),
                        cause: e.into(),
                    })?;
                tracing::info!(bucket = %bucket, key = %key, records = records.len(), "artifact uploaded");
                Ok(format!("gs://{bucket}/{key}"))
            }
        }
    }
}

/// `scrape-<UTC timestamp>.json`; second resolution distinguishes runs.
pub fn artifact_name(now: DateTime<Utc>) -> String {
    format!("scrape-{}.json", now.format("%Y%m%dT%H%M%SZ"))
}

fn object_key(prefix: &str, name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}/{name}")
    }
}
