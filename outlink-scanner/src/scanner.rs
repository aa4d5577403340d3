use crate::error::{Result, ScanError};
use crate::extract::{ExtractedUrl, extract_urls};
use crate::request::build_request;
use crate::response::read_response;
use crate::result::ScanResult;
use crate::target::{Target, validate_link};
use crate::transport::Connection;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Single-shot page scanner. Each call to [`scan`](Scanner::scan) opens one
/// connection, performs one request/response exchange and closes the stream;
/// nothing is cached or reused between calls.
pub struct Scanner {
    timeout: Duration,
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Fetch `link` and extract the unique origins its page references.
    ///
    /// The pipeline is validate, parse, connect, send, drain, extract. A
    /// non-200 status aborts before extraction. Any failure along the way
    /// surfaces as a [`ScanError`]; the connection is closed on every path.
    pub fn scan(&self, link: &str) -> Result<ScanResult> {
        info!("Scanning {}", link);

        validate_link(link)?;
        let target = Target::parse(link)?;
        let started = Instant::now();

        let mut conn = Connection::open(&target, self.timeout)?;
        let request = build_request(&target);
        debug!("sending request to {}", target.connect_addr());
        conn.send(request.as_bytes())?;

        let document = read_response(&mut conn)?;
        drop(conn);

        if document.status != 200 {
            return Err(ScanError::UnexpectedStatus(document.status));
        }

        let urls_found = extract_urls(&document.text);
        // Port-qualified targets compare by hostname; extracted hosts never
        // carry a port, so comparing against host:port would mark everything
        // external.
        let external_links: Vec<ExtractedUrl> = urls_found
            .iter()
            .filter(|u| u.host != target.hostname())
            .cloned()
            .collect();

        info!(
            "{}: {} unique URLs found, {} external",
            target.origin(),
            urls_found.len(),
            external_links.len()
        );

        Ok(ScanResult {
            url: link.to_string(),
            origin: target.origin(),
            status_code: document.status,
            response_time: started.elapsed(),
            response_len: document.text.len(),
            urls_found,
            external_links,
            error: None,
        })
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}
