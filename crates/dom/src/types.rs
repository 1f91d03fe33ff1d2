//! Core type definitions for the parsed document tree
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Node kind is a tagged variant, never a type check
//! 3. Use SmallVec for small arrays (avoid heap allocation)

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any feed
pub type NodeId = u32;

/// What a node is, and the data that only makes sense for that kind.
///
/// Traversal code matches on this exhaustively, so adding a kind is a
/// compile error everywhere it matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum NodeKind {
    /// Synthetic root holding the top-level element plus any prolog misc
    Document,
    /// Tag name exactly as written, including a namespace prefix if any
    Element { tag: String },
    Text(String),
    CData(String),
    Comment(String),
}

impl NodeKind {
    /// Short name used in logs and outlines
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Document => "#document",
            NodeKind::Element { .. } => "element",
            NodeKind::Text(_) => "#text",
            NodeKind::CData(_) => "#cdata-section",
            NodeKind::Comment(_) => "#comment",
        }
    }
}

/// Attribute as it appeared on the start tag, value unescaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// The document tree node structure
///
/// Design philosophy:
/// - Small fixed-size fields first (better packing)
/// - Use indices instead of pointers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,

    // Navigation indices
    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    pub kind: NodeKind,

    // Only populated for elements
    pub attributes: Vec<Attribute>,
}

impl DomNode {
    /// Create a detached node; the arena assigns the real id on insert
    pub fn new(kind: NodeKind) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            children_ids: SmallVec::new(),
            kind,
            attributes: Vec::new(),
        }
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element { tag: tag.into() })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(text.into()))
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { tag } => Some(tag),
            _ => None,
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }

    /// Character data this node contributes to its ancestors' text content
    pub fn character_data(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) | NodeKind::CData(text) => Some(text),
            NodeKind::Document | NodeKind::Element { .. } | NodeKind::Comment(_) => None,
        }
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}
