//! Fetch layer - turns a feed URL into raw bytes
//!
//! Core principle: the pipeline only knows the [`Fetcher`] trait. The real
//! network client lives in [`http`]; tests plug in canned sources.

pub mod http;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

pub use http::HttpFetcher;

/// Source of feed bytes
///
/// Fail fast - no retries, no caching. Let the caller decide.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Human-readable name for logging
    fn name(&self) -> &str;

    /// Download the complete document at `url`
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
