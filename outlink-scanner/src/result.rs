use crate::extract::ExtractedUrl;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of scanning one page. `urls_found` is the full deduplicated set
/// in first-seen order; `external_links` is the subset whose host differs
/// from the scanned target's host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub url: String,
    pub origin: String,
    pub status_code: u16,
    pub response_time: Duration,
    pub response_len: usize,
    pub urls_found: Vec<ExtractedUrl>,
    pub external_links: Vec<ExtractedUrl>,
    pub error: Option<String>,
}

impl ScanResult {
    pub fn new(url: String) -> Self {
        Self {
            url,
            origin: String::new(),
            status_code: 0,
            response_time: Duration::from_secs(0),
            response_len: 0,
            urls_found: Vec::new(),
            external_links: Vec::new(),
            error: None,
        }
    }

    pub fn with_error(url: String, error: String) -> Self {
        Self {
            url,
            origin: String::new(),
            status_code: 0,
            response_time: Duration::from_secs(0),
            response_len: 0,
            urls_found: Vec::new(),
            external_links: Vec::new(),
            error: Some(error),
        }
    }
}
