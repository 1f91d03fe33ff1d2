//! Feed Document Library
//!
//! Arena-backed document tree for RSS/XML content, plus the one query the
//! rest of the workspace really needs: "text of the first element named X".
//!
//! ## Philosophy
//!
//! - **Good taste**: Data structures first, algorithms follow naturally
//! - **No special cases**: Node kinds are a tagged enum, not type checks
//! - **Zero copy reads**: queries hand out borrowed [`NodeRef`] handles
//!
//! ## Core Design
//!
//! ```text
//! bytes → DomParser (quick-xml events) → DomArena (owned) → NodeRef → query
//!                                             ↓
//!                                       NodeId (u32)
//! ```

pub mod arena;
pub mod error;
pub mod parser;
pub mod query;
pub mod serializer;
pub mod types;
pub mod utils;

pub use arena::{DomArena, NodeRef};
pub use error::{DomError, Result};
pub use parser::{DomParser, ParserConfig};
pub use query::{
    elements_by_tag, find_first_tag_content, find_scoped_tag_content, first_element_by_tag,
    tag_name_eq,
};
pub use serializer::DomSerializer;
pub use types::*;
