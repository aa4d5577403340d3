use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("link is empty or too short")]
    EmptyLink,

    #[error("link is missing the \"://\" scheme separator")]
    MissingSchemeSeparator,

    #[error("unsupported scheme in link: {0}")]
    UnsupportedScheme(String),

    #[error("link has an empty host")]
    EmptyHost,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TLS error: {0}")]
    Tls(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("unexpected status: {0}")]
    UnexpectedStatus(u16),
}

pub type Result<T> = std::result::Result<T, ScanError>;
