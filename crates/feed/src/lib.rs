//! Latest Feed Entry - fetch an RSS feed and show its newest item
//!
//! This crate wires the `dom` crate's tag search to the outside world:
//! an HTTP fetcher, a background retrieval task and an HTML renderer.
//!
//! # Architecture
//!
//! ```text
//! FeedConfig → ContentRetriever ─spawn→ Fetcher (reqwest) → DomParser → latest_entry → Renderer
//!                    │
//!                    └─ EventBus (FeedEvent broadcast)
//! ```
//!
//! 1. **Fail fast**: no retries, no caching, every failure has its own error kind
//! 2. **Seams as traits**: [`Fetcher`] and [`Renderer`] are swappable
//! 3. **Off the display path**: retrieval runs on a tokio task with an explicit result

pub mod config;
pub mod error;
pub mod events;
pub mod extract;
pub mod fetch;
pub mod render;
pub mod retriever;

pub use config::{ConfigOverrides, FeedConfig, DEFAULT_SOURCE};
pub use error::{FeedError, Result};
pub use events::{EventBus, FeedEvent};
pub use extract::{latest_entry, ExtractOptions, LatestEntry};
pub use fetch::{Fetcher, HttpFetcher};
pub use render::{HtmlPageRenderer, RawRenderer, Renderer};
pub use retriever::ContentRetriever;
