//! Tree serializer - human-readable views of a parsed document
//!
//! This module handles:
//! - Indented outline of the element structure (debug output)
//! - Nested JSON form of the tree
//! - XPath-like location of a node, used to report where content came from

use serde_json::{json, Value};

use crate::arena::{DomArena, NodeRef};
use crate::error::{DomError, Result};
use crate::query::tag_name_eq;
use crate::types::*;
use crate::utils::cap_text_length;

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    pub include_attributes: bool,
    pub include_comments: bool,
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            include_attributes: true,
            include_comments: false,
            max_text_length: 80,
        }
    }
}

/// Document tree serializer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serialize the tree to an indented outline
    pub fn serialize(&self, arena: &DomArena) -> Result<String> {
        let mut output = String::with_capacity(4096);
        self.serialize_node(arena.root()?, 0, &mut output);
        Ok(output)
    }

    /// Serialize a single node recursively
    fn serialize_node(&self, node: NodeRef<'_>, depth: usize, output: &mut String) {
        let indent = "  ".repeat(depth);

        match node.kind() {
            NodeKind::Document => {
                for child in node.children() {
                    self.serialize_node(child, depth, output);
                }
            }
            NodeKind::Element { tag } => {
                output.push_str(&indent);
                output.push('<');
                output.push_str(tag);

                if self.config.include_attributes {
                    for attr in &node.data().attributes {
                        output.push_str(&format!(" {}=\"{}\"", attr.name, attr.value));
                    }
                }

                output.push_str(">\n");

                for child in node.children() {
                    self.serialize_node(child, depth + 1, output);
                }
            }
            NodeKind::Text(text) | NodeKind::CData(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    output.push_str(&indent);
                    output.push_str(&cap_text_length(text, self.config.max_text_length));
                    output.push('\n');
                }
            }
            NodeKind::Comment(text) => {
                if self.config.include_comments {
                    output.push_str(&indent);
                    output.push_str("<!--");
                    output.push_str(&cap_text_length(text.trim(), self.config.max_text_length));
                    output.push_str("-->\n");
                }
            }
        }
    }

    /// Nested JSON form: elements become `{tag, attributes, children}`,
    /// character data becomes a plain string
    pub fn to_json(&self, arena: &DomArena) -> Result<Value> {
        Ok(self.node_to_json(arena.root()?))
    }

    fn node_to_json(&self, node: NodeRef<'_>) -> Value {
        match node.kind() {
            NodeKind::Document => json!({ "document": self.children_to_json(node) }),
            NodeKind::Element { tag } => {
                let attributes: serde_json::Map<String, Value> = node
                    .data()
                    .attributes
                    .iter()
                    .map(|a| (a.name.clone(), Value::String(a.value.clone())))
                    .collect();
                json!({
                    "tag": tag,
                    "attributes": attributes,
                    "children": self.children_to_json(node),
                })
            }
            NodeKind::Text(text) | NodeKind::CData(text) => Value::String(text.clone()),
            NodeKind::Comment(text) => json!({ "comment": text }),
        }
    }

    fn children_to_json(&self, node: NodeRef<'_>) -> Vec<Value> {
        node.children()
            .filter(|c| self.config.include_comments || !matches!(c.kind(), NodeKind::Comment(_)))
            .map(|c| self.node_to_json(c))
            .collect()
    }

    /// Generate XPath for a node
    pub fn generate_xpath(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut path_parts = Vec::new();
        let mut current_id = Some(node_id);

        while let Some(id) = current_id {
            let node = arena.get(id)?;

            if let Some(tag) = node.tag_name() {
                // Get position among siblings with same tag name
                let position = match node.parent_id {
                    Some(parent_id) => arena
                        .node(parent_id)
                        .ok_or(DomError::NodeNotFound(parent_id))?
                        .children()
                        .filter(|child| child.tag_name().is_some_and(|t| tag_name_eq(t, tag)))
                        .position(|child| child.id() == node.node_id)
                        .map(|p| p + 1) // XPath is 1-indexed
                        .unwrap_or(1),
                    None => 1,
                };

                path_parts.push(format!("{}[{}]", tag, position));
            }

            current_id = node.parent_id;
        }

        path_parts.reverse();
        Ok(format!("/{}", path_parts.join("/")))
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}
