pub mod error;
pub mod extract;
pub mod request;
pub mod response;
pub mod result;
pub mod scanner;
pub mod target;
pub mod transport;

pub use error::ScanError;
pub use extract::{ExtractedUrl, extract_urls};
pub use response::ResponseDocument;
pub use result::ScanResult;
pub use scanner::Scanner;
pub use target::{Scheme, Target, validate_link};
