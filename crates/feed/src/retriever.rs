//! Content Retriever - fetch, parse and extract in one run
//!
//! This is the high-level API the CLI drives. The network fetch runs on
//! a spawned tokio task so a display loop never waits on it; the task
//! hands back an explicit result instead of logging and swallowing
//! failures.

use std::sync::Arc;

use dom::utils::{cap_text_length, normalize_whitespace};
use dom::{DomArena, DomParser, ParserConfig};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::events::{EventBus, FeedEvent};
use crate::extract::{latest_entry, ExtractOptions, LatestEntry};
use crate::fetch::{Fetcher, HttpFetcher};

pub struct ContentRetriever {
    pub config: FeedConfig,
    pub event_bus: EventBus,

    fetcher: Arc<dyn Fetcher>,
    parser: DomParser,
}

impl ContentRetriever {
    /// Retriever backed by the real HTTP client
    pub fn new(config: FeedConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Retriever with a custom byte source
    pub fn with_fetcher(config: FeedConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            config,
            event_bus: EventBus::new(),
            fetcher,
            parser: DomParser::with_config(ParserConfig::default()),
        }
    }

    /// Swap the parser, e.g. to drop whitespace-only text
    pub fn with_parser(mut self, parser: DomParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.event_bus.subscribe()
    }

    /// Download and parse the configured feed
    pub async fn fetch_document(&self) -> Result<DomArena> {
        let url = self.config.source_url()?;

        self.event_bus.publish(FeedEvent::FetchStarted {
            run_id: self.config.id.clone(),
            url: url.to_string(),
        });
        tracing::info!(fetcher = self.fetcher.name(), "fetching feed");

        let bytes = self.fetcher.fetch(&url).await?;
        self.event_bus.publish(FeedEvent::FetchCompleted {
            url: url.to_string(),
            bytes: bytes.len(),
        });
        tracing::debug!(bytes = bytes.len(), "feed downloaded");

        let arena = self.parser.parse(&bytes)?;
        self.event_bus
            .publish(FeedEvent::Parsed { nodes: arena.len() });
        tracing::debug!(nodes = arena.len(), "feed parsed");

        Ok(arena)
    }

    /// Full pipeline: fetch, parse, extract the first item's content
    pub async fn retrieve(&self) -> Result<LatestEntry> {
        let span = tracing::info_span!(
            "retrieve",
            run_id = %self.config.id,
            source = %self.config.source
        );

        let result = self.run().instrument(span.clone()).await;

        let _enter = span.enter();
        match &result {
            Ok(entry) => {
                tracing::info!(
                    location = %entry.location,
                    preview = %cap_text_length(&normalize_whitespace(&entry.content), 60),
                    "latest entry ready"
                );
                self.event_bus.publish(FeedEvent::ContentReady {
                    location: entry.location.clone(),
                    length: entry.content.len(),
                });
            }
            Err(e) => {
                tracing::error!("Failed to retrieve feed content: {}", e);
                self.event_bus.publish(FeedEvent::Failed {
                    error: e.to_string(),
                });
            }
        }

        result
    }

    async fn run(&self) -> Result<LatestEntry> {
        let arena = self.fetch_document().await?;
        latest_entry(&arena, &ExtractOptions::from(&self.config))
    }

    /// Run [`retrieve`](Self::retrieve) on a background task
    pub fn spawn(self: Arc<Self>) -> JoinHandle<Result<LatestEntry>> {
        tokio::spawn(async move { self.retrieve().await })
    }
}
