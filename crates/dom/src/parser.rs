//! XML Parser - builds a [`DomArena`] from raw feed bytes
//!
//! This handles:
//! - quick-xml event stream to arena construction
//! - Entity resolution (predefined and numeric character references)
//! - Charset decoding: byte input honours the BOM or the `encoding`
//!   named in the XML declaration (`ISO-8859-1`, `windows-1252`, ...)
//! - Well-formedness checks quick-xml leaves to the caller
//!   (single root element, no stray text, unclosed elements)
//!
//! Adjacent text pieces are merged into one text node, so
//! `a &amp; b` becomes a single `#text` child reading `a & b`.

use std::io::BufRead;

use quick_xml::encoding::Decoder;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{Attribute, DomNode, NodeId, NodeKind};

/// Configuration for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Keep comment nodes in the tree (they never contribute text content)
    pub keep_comments: bool,
    /// Drop text nodes made only of whitespace (indentation between tags)
    pub skip_whitespace_text: bool,
    /// Deepest element nesting accepted before bailing out (self-closing
    /// elements count too)
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            keep_comments: true,
            skip_whitespace_text: false,
            max_depth: 512,
        }
    }
}

/// Main document parser
#[derive(Debug, Clone, Default)]
pub struct DomParser {
    config: ParserConfig,
}

impl DomParser {
    /// Create new parser with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create parser with custom config
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a complete document held in memory
    pub fn parse(&self, bytes: &[u8]) -> Result<DomArena> {
        self.parse_reader(bytes)
    }

    /// Parse already-decoded text; any declared encoding is ignored
    pub fn parse_str(&self, xml: &str) -> Result<DomArena> {
        self.build(Reader::from_str(xml))
    }

    /// Parse from any buffered source
    ///
    /// The returned arena's root is a `Document` node whose children are
    /// the root element plus any top-level comments.
    pub fn parse_reader<R: BufRead>(&self, source: R) -> Result<DomArena> {
        self.build(Reader::from_reader(source))
    }

    fn build<R: BufRead>(&self, mut reader: Reader<R>) -> Result<DomArena> {
        let mut builder = TreeBuilder::new(&self.config);
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(start) => {
                    let id = builder.open_element(&start, reader.decoder())?;
                    builder.stack.push(id);
                }
                Event::Empty(start) => {
                    builder.open_element(&start, reader.decoder())?;
                }
                Event::End(_) => {
                    builder.flush_text()?;
                    // quick-xml already verified the end name matches
                    builder.stack.pop();
                }
                Event::Text(text) => {
                    let text = text
                        .decode()
                        .map_err(|e| DomError::Encoding(e.to_string()))?;
                    builder.text.push_str(&text);
                }
                Event::GeneralRef(reference) => {
                    let name = reference
                        .decode()
                        .map_err(|e| DomError::Encoding(e.to_string()))?;
                    builder.text.push_str(&resolve_entity(&name)?);
                }
                Event::CData(cdata) => {
                    let text = cdata
                        .decode()
                        .map_err(|e| DomError::Encoding(e.to_string()))?;
                    builder.flush_text()?;
                    builder.append(NodeKind::CData(text.into_owned()))?;
                }
                Event::Comment(comment) => {
                    builder.flush_text()?;
                    if self.config.keep_comments {
                        let text = comment
                            .decode()
                            .map_err(|e| DomError::Encoding(e.to_string()))?;
                        builder.append(NodeKind::Comment(text.into_owned()))?;
                    }
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {
                    builder.flush_text()?;
                }
                Event::Eof => break,
            }
            buf.clear();
        }

        builder.finish()
    }
}

/// Resolve `&name;` to its replacement text
fn resolve_entity(name: &str) -> Result<String> {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x').or_else(|| number.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        }
        .map_err(|_| DomError::InvalidEntity(name.to_string()))?;

        return char::from_u32(code)
            .map(String::from)
            .ok_or_else(|| DomError::InvalidEntity(name.to_string()));
    }

    resolve_predefined_entity(name)
        .map(str::to_string)
        .ok_or_else(|| DomError::InvalidEntity(name.to_string()))
}

/// Incremental arena construction state
struct TreeBuilder<'c> {
    config: &'c ParserConfig,
    arena: DomArena,
    document: NodeId,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    /// Character data not yet attached to the tree
    text: String,
    root_element: Option<String>,
}

impl<'c> TreeBuilder<'c> {
    fn new(config: &'c ParserConfig) -> Self {
        let mut arena = DomArena::new();
        let document = arena.add_node(DomNode::new(NodeKind::Document));
        Self {
            config,
            arena,
            document,
            stack: Vec::new(),
            text: String::new(),
            root_element: None,
        }
    }

    fn current_parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(self.document)
    }

    fn append(&mut self, kind: NodeKind) -> Result<NodeId> {
        let parent = self.current_parent();
        self.arena.append_child(parent, DomNode::new(kind))
    }

    /// Reject an element opened at `depth` (the root element is depth 1)
    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                current: depth,
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Attach buffered character data as a single text node
    fn flush_text(&mut self) -> Result<()> {
        if self.text.is_empty() {
            return Ok(());
        }
        let text = std::mem::take(&mut self.text);
        let blank = text.chars().all(char::is_whitespace);

        if self.stack.is_empty() {
            // Only whitespace may surround the root element
            if blank {
                return Ok(());
            }
            return Err(DomError::TextOutsideRoot(text));
        }
        if blank && self.config.skip_whitespace_text {
            return Ok(());
        }

        self.append(NodeKind::Text(text))?;
        Ok(())
    }

    fn open_element(&mut self, start: &BytesStart<'_>, decoder: Decoder) -> Result<NodeId> {
        self.flush_text()?;
        self.check_depth(self.stack.len() + 1)?;

        let tag = decoder
            .decode(start.name().as_ref())
            .map_err(|e| DomError::Encoding(e.to_string()))?
            .into_owned();

        if self.stack.is_empty() {
            if let Some(first) = &self.root_element {
                tracing::debug!(first = %first, second = %tag, "second root element");
                return Err(DomError::MultipleRoots(tag));
            }
            self.root_element = Some(tag.clone());
        }

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| DomError::InvalidAttribute(e.to_string()))?;
            let name = decoder
                .decode(attr.key.as_ref())
                .map_err(|e| DomError::Encoding(e.to_string()))?
                .into_owned();
            let value = attr
                .decode_and_unescape_value(decoder)
                .map_err(|e| DomError::InvalidAttribute(format!("{name}: {e}")))?
                .into_owned();
            attributes.push(Attribute { name, value });
        }

        let parent = self.current_parent();
        self.arena.append_element(parent, tag, attributes)
    }

    fn finish(mut self) -> Result<DomArena> {
        self.flush_text()?;

        if let Some(&open) = self.stack.last() {
            let tag = self
                .arena
                .get(open)?
                .tag_name()
                .unwrap_or_default()
                .to_string();
            return Err(DomError::UnclosedElement(tag));
        }
        if self.root_element.is_none() {
            return Err(DomError::MissingRoot);
        }

        self.arena.set_root(self.document)?;
        tracing::debug!(nodes = self.arena.len(), "parsed document");
        Ok(self.arena)
    }
}
