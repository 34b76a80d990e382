// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use crate::scrape::providers::{cms, nucc};
use crate::scrape::retry::RetryPolicy;

pub const ENV_BUCKET: &str = "GCS_BUCKET_NAME";
pub const ENV_OBJECT_PREFIX: &str = "GCS_OBJECT_PREFIX";
pub const ENV_ACCESS_TOKEN: &str = "GCS_ACCESS_TOKEN";
pub const ENV_OUTPUT_DIR: &str = "OUTPUT_DIR";
pub const ENV_CMS_URL: &str = "CMS_CODES_URL";
pub const ENV_NUCC_URL: &str = "NUCC_TAXONOMY_URL";
pub const ENV_TIMEOUT_SECS: &str = "SCRAPE_TIMEOUT_SECS";
pub const ENV_RETRY_ATTEMPTS: &str = "SCRAPE_RETRY_ATTEMPTS";

pub const DEFAULT_OUTPUT_DIR: &str = "output";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where artifacts go. Resolved exactly once at config time; the writer
/// never re-inspects the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Local { dir: PathBuf },
    Remote { bucket: String, prefix: String },
}

#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub cms_url: String,
    pub nucc_url: String,
    pub destination: Destination,
    /// Pre-acquired bearer token for the remote store, passed through
    /// opaquely. No auth flow lives here.
    pub gcs_token: Option<String>,
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl ScraperConfig {
    /// Read configuration from the environment, falling back to the
    /// defaults for anything unset. A non-empty bucket name selects the
    /// remote destination; otherwise artifacts land in the local dir.
    pub fn from_env() -> Self {
        let destination = match env_nonempty(ENV_BUCKET) {
            Some(bucket) => Destination::Remote {
                bucket,
                prefix: env_nonempty(ENV_OBJECT_PREFIX).unwrap_or_default(),
            },
            None => Destination::Local {
                dir: PathBuf::from(
                    env_nonempty(ENV_OUTPUT_DIR).unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
                ),
            },
        };

        let timeout_secs = env_nonempty(ENV_TIMEOUT_SECS)
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let retry = match env_nonempty(ENV_RETRY_ATTEMPTS).and_then(|v| v.parse::<u8>().ok()) {
            Some(attempts) => RetryPolicy::new(attempts, RetryPolicy::default().base_delay),
            None => RetryPolicy::default(),
        };

        Self {
            cms_url: env_nonempty(ENV_CMS_URL).unwrap_or_else(|| cms::DEFAULT_URL.to_string()),
            nucc_url: env_nonempty(ENV_NUCC_URL).unwrap_or_else(|| nucc::DEFAULT_URL.to_string()),
            destination,
            gcs_token: env_nonempty(ENV_ACCESS_TOKEN),
            timeout: Duration::from_secs(timeout_secs),
            retry,
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn clear_all() {
        for k in [
            ENV_BUCKET,
            ENV_OBJECT_PREFIX,
            ENV_ACCESS_TOKEN,
            ENV_OUTPUT_DIR,
            ENV_CMS_URL,
            ENV_NUCC_URL,
            ENV_TIMEOUT_SECS,
            ENV_RETRY_ATTEMPTS,
        ] {
            env::remove_var(k);
        }
    }

    #[serial_test::serial]
    #[test]
    fn defaults_to_local_output_dir() {
        clear_all();
        let cfg = ScraperConfig::from_env();
        assert_eq!(
            cfg.destination,
            Destination::Local {
                dir: PathBuf::from(DEFAULT_OUTPUT_DIR)
            }
        );
        assert_eq!(cfg.cms_url, cms::DEFAULT_URL);
        assert_eq!(cfg.nucc_url, nucc::DEFAULT_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[serial_test::serial]
    #[test]
    fn bucket_presence_selects_remote() {
        clear_all();
        env::set_var(ENV_BUCKET, "my-bucket");
        env::set_var(ENV_OBJECT_PREFIX, "codes");
        let cfg = ScraperConfig::from_env();
        assert_eq!(
            cfg.destination,
            Destination::Remote {
                bucket: "my-bucket".to_string(),
                prefix: "codes".to_string()
            }
        );
        clear_all();
    }

    #[serial_test::serial]
    #[test]
    fn blank_bucket_counts_as_unset() {
        clear_all();
        env::set_var(ENV_BUCKET, "   ");
        let cfg = ScraperConfig::from_env();
        assert!(matches!(cfg.destination, Destination::Local { .. }));
        clear_all();
    }

    #[serial_test::serial]
    #[test]
    fn retry_attempts_override() {
        clear_all();
        env::set_var(ENV_RETRY_ATTEMPTS, "5");
        let cfg = ScraperConfig::from_env();
        assert_eq!(cfg.retry.max_attempts, 5);
        // Only the attempt count is overridden; the backoff base stays
        // whatever the default policy carries.
        assert_eq!(cfg.retry.base_delay, RetryPolicy::default().base_delay);
        clear_all();
    }
}
