use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::summary::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::view::{PageMeta, ViewVariant};

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:9002";

/// Host settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub report_path: PathBuf,
    pub bind_addr: String,
    pub public_url: String,
    pub variant: ViewVariant,
    pub summary_api_key: Option<String>,
    pub summary_model: String,
    pub summary_timeout: Duration,
    /// Issuer details for the badge, signature block and footer.
    pub page_meta: PageMeta,
}

impl AppConfig {
    /// Load `.env` then read the process environment.
    pub fn from_env() -> Result<Self, String> {
        if let Ok(path) = dotenvy::dotenv() {
            info!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let report_path = get("AG_REPORT_PATH")
            .map(PathBuf::from)
            .ok_or_else(|| "AG_REPORT_PATH is not set".to_string())?;

        let bind_addr = get("AG_BIND_ADDR").unwrap_or_else(|| {
            warn!("AG_BIND_ADDR not set, using {}", DEFAULT_BIND_ADDR);
            DEFAULT_BIND_ADDR.to_string()
        });

        let public_url = get("AG_PUBLIC_URL").unwrap_or_else(|| format!("http://{}/", bind_addr));

        let variant = match get("AG_VIEW_VARIANT") {
            Some(name) => name.parse::<ViewVariant>()?,
            None => ViewVariant::Full,
        };

        let summary_api_key = get("GEMINI_API_KEY").or_else(|| get("API_KEY"));
        let summary_model = get("AG_SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let summary_timeout = match get("AG_SUMMARY_TIMEOUT_SECS") {
            Some(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(format!(
                        "AG_SUMMARY_TIMEOUT_SECS must be a positive whole number of seconds, got {:?}",
                        secs
                    ))
                }
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let page_meta = PageMeta {
            appraisal_number: get("AG_APPRAISAL_NUMBER"),
            appraiser_name: get("AG_APPRAISER_NAME"),
            appraiser_title: get("AG_APPRAISER_TITLE"),
            issued_on: get("AG_ISSUED_ON"),
            copyright: get("AG_COPYRIGHT"),
        };
        if page_meta.is_empty() {
            info!("No issuer details configured, page header and signature left blank");
        }

        Ok(AppConfig {
            report_path,
            bind_addr,
            public_url,
            variant,
            summary_api_key,
            summary_model,
            summary_timeout,
            page_meta,
        })
    }
}
