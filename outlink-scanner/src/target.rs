use crate::error::{Result, ScanError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transport scheme of a scan target. Only plain HTTP and HTTPS exist here;
/// anything else is rejected before a socket is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed scan target: scheme, host authority and request path.
/// Derived once from the input link and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub scheme: Scheme,
    pub host: String,
    pub path: String,
}

/// Screen a raw link before any parsing or network activity.
///
/// The rules are deliberately loose and run in order: minimum length, a
/// `://` separator somewhere, and `http` somewhere in the string. Substring
/// matching (not a prefix check) is the contract: `ftp://http-mirror.example`
/// passes here and is only rejected later by [`Target::parse`].
pub fn validate_link(link: &str) -> Result<()> {
    if link.len() < 2 {
        return Err(ScanError::EmptyLink);
    }
    if !link.contains("://") {
        return Err(ScanError::MissingSchemeSeparator);
    }
    // "https" necessarily contains "http", so one substring test covers both
    if !link.contains("http") {
        return Err(ScanError::UnsupportedScheme(link.to_string()));
    }
    Ok(())
}

impl Target {
    /// Decompose a link into scheme, host and path.
    ///
    /// The link is split once on `://`; the remainder is split on the first
    /// `/`. A missing path defaults to `/`. The scheme token must be exactly
    /// `http` or `https` (case-sensitive).
    pub fn parse(link: &str) -> Result<Self> {
        let (scheme_token, remainder) = link
            .split_once("://")
            .ok_or(ScanError::MissingSchemeSeparator)?;

        let scheme = match scheme_token {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => return Err(ScanError::UnsupportedScheme(other.to_string())),
        };

        let (host, path) = match remainder.split_once('/') {
            Some((host, rest)) => (host.to_string(), format!("/{rest}")),
            None => (remainder.to_string(), "/".to_string()),
        };

        if host.is_empty() {
            return Err(ScanError::EmptyHost);
        }

        Ok(Target { scheme, host, path })
    }

    /// `scheme://host` form of this target, the shape extracted references
    /// are reported in.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    /// Host name without an explicit port, as used for DNS and TLS
    /// certificate verification.
    pub fn hostname(&self) -> &str {
        match self.host.split_once(':') {
            Some((name, _)) => name,
            None => &self.host,
        }
    }

    /// Dial string for the transport. An explicit `host:port` authority is
    /// used verbatim; otherwise the scheme's default port applies.
    pub fn connect_addr(&self) -> String {
        if self.host.contains(':') {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.scheme.default_port())
        }
    }
}
