//! Error types for lookups, transport and extraction rules

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a reverse lookup
#[derive(Debug, Error)]
pub enum LookupError {
    /// Any I/O failure while fetching either page (never retried)
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// None of the cookie patterns matched the first response
    #[error("HTML response does not contain cookie value")]
    MissingCookie,
}

/// Failure of a single GET, including its redirect hops
#[derive(Debug, Error)]
pub enum TransportError {
    /// `url` is already redacted
    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    #[error("invalid redirect location: {location}")]
    InvalidRedirect { location: String },

    /// The value is not kept, it may hold the session cookie
    #[error("invalid {name} header value")]
    InvalidHeader { name: String },
}

/// Invalid or unreadable extraction rules
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid {field} pattern: {source}")]
    Pattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("{field} pattern has no capture group")]
    NoCaptureGroup { field: &'static str },

    #[error("failed to read rules file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
