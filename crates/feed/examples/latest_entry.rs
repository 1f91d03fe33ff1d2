//! Basic retrieval example - print pipeline events and the latest entry

use feed::{ContentRetriever, FeedConfig, HtmlPageRenderer, Renderer};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = FeedConfig {
        source: std::env::args()
            .nth(1)
            .unwrap_or_else(|| feed::DEFAULT_SOURCE.to_string()),
        ..FeedConfig::default()
    };
    println!("Fetching: {}", config.source);

    let retriever = Arc::new(ContentRetriever::new(config)?);

    // Subscribe to events before starting
    let mut event_rx = retriever.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            println!("Event: {:?}", event);
        }
    });

    let entry = Arc::clone(&retriever).spawn().await??;

    if let Some(title) = &entry.title {
        println!("Title: {}", title);
    }
    println!("Found at: {}", entry.location);
    println!("{}", HtmlPageRenderer.render(&entry.content));

    Ok(())
}
