//! Error types for document operations
//!
//! Simple, flat error hierarchy. No over-engineering.
//!
//! Lookups that simply find nothing are not errors: the query functions
//! return `Option`. These variants are for broken input and bad ids.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Document has more than one root element (second one: <{0}>)")]
    MultipleRoots(String),

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Text outside of the root element: {0:?}")]
    TextOutsideRoot(String),

    #[error("Invalid text encoding: {0}")]
    Encoding(String),

    #[error("Invalid attribute: {0}")]
    InvalidAttribute(String),

    #[error("Unknown entity reference: &{0};")]
    InvalidEntity(String),

    #[error("Maximum nesting depth exceeded: {current} > {max}")]
    MaxDepthExceeded { current: usize, max: usize },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
