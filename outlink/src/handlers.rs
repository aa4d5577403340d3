use clap::ArgMatches;
use colored::Colorize;
use outlink_core::report::{
    ReportFormat, gather_report_data, generate_json_report, generate_text_report, save_report,
};
use outlink_core::scan::{ScanOptions, ScanProgressCallback, execute_scan};
use outlink_scanner::validate_link;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber;

// Helper functions for the scan handler

/// Load URLs from either a file or a single URL argument
pub fn load_urls_from_source(
    url: Option<&String>,
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if let Some(url) = url {
        Ok(vec![url.clone()])
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_url_line(line.trim()))
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // A link never contains embedded whitespace
    if line.contains(char::is_whitespace) {
        eprintln!("⚠️  Skipping invalid URL '{}'", line);
        return None;
    }

    // Try to parse as-is
    if validate_link(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if validate_link(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::tilde(raw.as_ref());
    PathBuf::from(expanded.as_ref())
}

pub fn handle_scan(sub_matches: &ArgMatches, quiet: bool) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let url = sub_matches.get_one::<String>("url");
    let hosts_file = sub_matches.get_one::<std::path::PathBuf>("hosts-file");
    let timeout = *sub_matches.get_one::<u64>("timeout").unwrap_or(&10);
    let format = sub_matches.get_one::<String>("format").unwrap();
    let output = sub_matches.get_one::<std::path::PathBuf>("output");
    let include_all = sub_matches.get_flag("all");

    // Load URLs from source
    let hosts_file = hosts_file.map(|p| expand_path(p));
    let urls = match load_urls_from_source(url, hosts_file.as_ref()) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    // Print scan configuration
    if !quiet {
        println!("\n🔗 Scanning {} host(s)", urls.len());
        println!("Timeout: {}s\n", timeout);
    }

    // Create scan options
    let options = ScanOptions {
        urls,
        timeout_secs: timeout,
        show_progress_bars: !quiet,
    };

    // Execute scan with progress callback
    let progress_callback: Option<ScanProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{}", msg);
        }))
    };

    let all_results = match execute_scan(options, progress_callback) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("✗ Scan failed: {}", e);
            std::process::exit(1);
        }
    };

    // Nothing scanned means nothing to report
    if all_results.iter().all(|r| r.error.is_some()) {
        for result in &all_results {
            if let Some(ref error) = result.error {
                eprintln!("{} {}: {}", "✗".red().bold(), result.url, error);
            }
        }
        std::process::exit(1);
    }

    if !quiet {
        println!("\n✓ Scan complete!\n");
    }

    // Generate the report
    let data = gather_report_data(&all_results, include_all);
    let report = match ReportFormat::from_str(format).unwrap_or(ReportFormat::Text) {
        ReportFormat::Text => generate_text_report(&data),
        ReportFormat::Json => match generate_json_report(&data) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("✗ Failed to generate JSON report: {}", e);
                std::process::exit(1);
            }
        },
    };

    // Save to file or display to screen
    match output {
        Some(path) => {
            let path = expand_path(path);
            if let Err(e) = save_report(&report, &path) {
                eprintln!("✗ Failed to save report to {}: {}", path.display(), e);
                std::process::exit(1);
            }
            if !quiet {
                println!("{} Report saved to {}", "✓".green().bold(), path.display());
            }
        }
        None => print!("{}", report),
    }
}
