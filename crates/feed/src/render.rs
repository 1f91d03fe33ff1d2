//! Rendering collaborator
//!
//! Content is inserted as-is. Feed descriptions are usually HTML already,
//! and sanitizing them is not this crate's job.

/// Turns extracted content into something a display can load
pub trait Renderer: Send + Sync {
    fn render(&self, content: &str) -> String;
}

/// Wraps content in a bare HTML page
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPageRenderer;

impl Renderer for HtmlPageRenderer {
    fn render(&self, content: &str) -> String {
        format!("<html><body>{content}</body></html>")
    }
}

/// Passes content through untouched
#[derive(Debug, Clone, Copy, Default)]
pub struct RawRenderer;

impl Renderer for RawRenderer {
    fn render(&self, content: &str) -> String {
        content.to_string()
    }
}
