//! Tree loading errors.

use thiserror::Error;

/// An error raised while loading a tree from the compiler's JSON AST.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The input is not valid JSON or does not match the AST shape.
    #[error("invalid AST JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level node is not a `root`.
    #[error("expected a `root` node at the top of the AST, found `{found}`")]
    UnexpectedRoot {
        /// Type of the node that was found.
        found: &'static str,
    },

    /// A `root` node appeared below the top level.
    #[error("`root` node nested inside the document")]
    NestedRoot,

    /// A frontmatter node that is not the first child of the root.
    #[error("frontmatter must be the first child of the root, found it at child {index}")]
    MisplacedFrontmatter {
        /// Index among the parent's children.
        index: usize,
    },

    /// A position that points past the end of the source text.
    #[error("offset {offset} is past the end of the source ({len} bytes)")]
    OffsetOutOfBounds {
        /// The offending offset.
        offset: u32,
        /// Source length in bytes.
        len: u32,
    },
}
