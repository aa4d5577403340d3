// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_urls_from_file,
    load_urls_from_source,
    parse_url_line,
};

// Re-export scan functionality from outlink-core
pub use outlink_core::scan::{ScanOptions, ScanProgressCallback, execute_scan};
