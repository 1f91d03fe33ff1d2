//! Error types for the feed pipeline
//!
//! Every stage has its own variant so callers can tell a network failure
//! from a malformed feed from a feed that simply has no entry.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeedError>;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Invalid feed URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Unsupported URL scheme: {0} (expected http or https)")]
    UnsupportedScheme(String),

    #[error("HTTP error: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Response body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("Feed parse error: {0}")]
    Parse(#[from] dom::DomError),

    #[error("No <{tag}> element in feed")]
    NotFound { tag: String },

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FeedError {
    /// Failure happened before any bytes were parsed
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            FeedError::InvalidUrl { .. }
                | FeedError::UnsupportedScheme(_)
                | FeedError::Fetch(_)
                | FeedError::HttpStatus { .. }
                | FeedError::BodyTooLarge { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FeedError::NotFound { .. })
    }
}
