use indicatif::{ProgressBar, ProgressStyle};
use outlink_scanner::Scanner;
use outlink_scanner::result::ScanResult;
use std::sync::Arc;
use tracing::warn;

/// Options for configuring a scan run
pub struct ScanOptions {
    pub urls: Vec<String>,
    pub timeout_secs: u64,
    pub show_progress_bars: bool,
}

/// Callback for reporting scan progress
pub type ScanProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Execute a scan over the given hosts, one request per host.
/// Returns one result per host; a failed host yields a result carrying the
/// error instead of aborting the whole run.
pub fn execute_scan(
    options: ScanOptions,
    progress_callback: Option<ScanProgressCallback>,
) -> Result<Vec<ScanResult>, String> {
    let ScanOptions {
        urls,
        timeout_secs,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap(),
        );
        pb.set_message("Starting scan...");
        Some(pb)
    } else {
        None
    };

    let scanner = Scanner::with_timeout(timeout_secs);
    let mut all_results = Vec::new();

    for (idx, url) in urls.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && urls.len() > 1
        {
            callback(format!("Scanning host {}/{}: {}", idx + 1, urls.len(), url));
        }

        if let Some(ref pb) = progress_bar {
            pb.set_message(format!("Fetching {}...", url));
            pb.tick();
        }

        match scanner.scan(url) {
            Ok(result) => all_results.push(result),
            Err(e) => {
                warn!("scan of {} failed: {}", url, e);
                if let Some(ref callback) = progress_callback {
                    callback(format!("[!]  Failed to scan {}: {}", url, e));
                }
                all_results.push(ScanResult::with_error(url.clone(), e.to_string()));
            }
        }
    }

    if let Some(ref pb) = progress_bar {
        pb.finish_with_message(format!(
            "Scan complete! {} host(s) processed",
            all_results.len()
        ));
    }

    Ok(all_results)
}
