//! Astro template to TSX printing for type-checking.
//!
//! This crate turns an Astro template tree into a single TSX module that a
//! TypeScript language service can analyse. It handles:
//! - Copying frontmatter code to the top of the module
//! - Rendering markup as JSX inside a `<Fragment>`
//! - Escaping text that would otherwise be read as JSX expressions
//! - Recording position mappings back into the `.astro` source
//!
//! # Example
//!
//! ```
//! use astro_ast::{Element, TreeBuilder};
//! use astro_tsx::{print_to_tsx, TsxOptions};
//!
//! // <p>{a}</p>
//! let source = "<p>{a}</p>";
//! let tree = TreeBuilder::new()
//!     .open(Element::new("p"), 0)
//!     .open_expression(3)
//!     .text(4, "a")
//!     .close_at(5)
//!     .close_at(6)
//!     .finish();
//!
//! let result = print_to_tsx(source, tree.root(), &TsxOptions::default());
//! assert!(result.code.starts_with("<Fragment>\n<p>{a}</p>"));
//! assert!(!result.chunk.is_empty());
//! ```

mod attributes;
mod classify;
mod escape;
mod naming;
mod printer;
mod render;

pub use classify::{classify, is_script_mime_type, TextContext, SCRIPT_MIME_TYPES};
pub use escape::{encode_double_quote, escape_braces, escape_template_literal, strip_comments};
pub use naming::{component_name, COMPONENT_SUFFIX};
pub use printer::{print_to_tsx, PrintResult, ShorthandPolicy, TsxOptions};
