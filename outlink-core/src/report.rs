// Report generation from scan results

use outlink_scanner::result::ScanResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportData {
    pub pages: Vec<PageReport>,
    pub total_external: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub origin: String,
    pub status_code: u16,
    pub duration_ms: u128,
    pub urls_found: usize,
    pub external_links: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Flatten scan results into the report model. `include_all` additionally
/// carries the full reference set per page, not just the external subset.
pub fn gather_report_data(results: &[ScanResult], include_all: bool) -> ReportData {
    let pages: Vec<PageReport> = results
        .iter()
        .map(|result| PageReport {
            url: result.url.clone(),
            origin: result.origin.clone(),
            status_code: result.status_code,
            duration_ms: result.response_time.as_millis(),
            urls_found: result.urls_found.len(),
            external_links: result
                .external_links
                .iter()
                .map(|u| u.to_string())
                .collect(),
            all_links: include_all
                .then(|| result.urls_found.iter().map(|u| u.to_string()).collect()),
            error: result.error.clone(),
        })
        .collect();

    let total_external = pages.iter().map(|p| p.external_links.len()).sum();

    ReportData {
        pages,
        total_external,
    }
}

pub fn generate_text_report(data: &ReportData) -> String {
    let mut report = String::new();

    // Header
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                       OUTLINK EXTERNAL REFERENCE REPORT\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    for page in &data.pages {
        report.push_str(&format!("Target:       {}\n", page.url));

        if let Some(ref error) = page.error {
            report.push_str(&format!("Result:       failed ({})\n", error));
            report.push_str("\n────────────────────────────────────────────────────────────────────────────────\n\n");
            continue;
        }

        report.push_str(&format!("Status:       {}\n", page.status_code));
        report.push_str(&format!("Duration:     {} ms\n", page.duration_ms));
        report.push_str(&format!("URLs found:   {}\n", page.urls_found));
        report.push('\n');

        if let Some(ref all_links) = page.all_links {
            report.push_str("All references:\n");
            for link in all_links {
                report.push_str(&format!("  {}\n", link));
            }
            report.push('\n');
        }

        report.push_str("External references:\n");
        if page.external_links.is_empty() {
            report.push_str("  (none)\n");
        } else {
            for link in &page.external_links {
                report.push_str(&format!("  {}\n", link));
            }
        }
        report.push_str(&format!(
            "\nExternal references found: {}\n",
            page.external_links.len()
        ));

        report.push_str("\n────────────────────────────────────────────────────────────────────────────────\n\n");
    }

    if data.pages.len() > 1 {
        report.push_str(&format!(
            "Total external references: {}\n\n",
            data.total_external
        ));
    }

    // Footer
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("                                 End of Report\n");
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    report.push_str("\nGenerated by Outlink - a single-shot external reference scanner\n\n");

    report
}

pub fn generate_json_report(data: &ReportData) -> Result<String, serde_json::Error> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Outlink",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "pages_scanned": data.pages.len(),
                "total_external_references": data.total_external
            },
            "pages": data.pages
        }
    });

    serde_json::to_string_pretty(&json_report)
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
