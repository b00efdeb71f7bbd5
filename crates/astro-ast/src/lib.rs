//! Document tree for Astro templates.
//!
//! This crate holds the input model of the TSX printer: an arena-backed tree of
//! document, frontmatter, element, text and comment nodes with parent and
//! sibling navigation. Trees are built programmatically with [`TreeBuilder`] or
//! loaded from the JSON AST produced by the Astro compiler with [`from_json`].
//!
//! # Example
//!
//! ```
//! use astro_ast::{Element, NodeKind, TreeBuilder};
//!
//! // <script type="module">{a}</script>
//! let tree = TreeBuilder::new()
//!     .open(Element::new("script"), 0)
//!     .text(22, "{a}")
//!     .close_at(25)
//!     .finish();
//!
//! let text = tree.root().first_child().unwrap().first_child().unwrap();
//! let script = text.closest(|n| n.as_element().is_some_and(|el| el.name == "script"));
//! assert!(script.is_some());
//! assert!(matches!(text.kind(), NodeKind::Text(_)));
//! ```

mod attribute;
mod builder;
mod error;
mod json;
mod tree;

pub use attribute::{Attribute, AttributeValue, DIRECTIVE_MARKER, IMPLICIT_NODE_MARKER};
pub use builder::TreeBuilder;
pub use error::TreeError;
pub use json::from_json;
pub use source_map::ByteOffset;
pub use tree::{Element, NodeId, NodeKind, NodeRef, Tree};
