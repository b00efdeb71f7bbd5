//! Source position tracking for astro-tsx-rs.
//!
//! The printer records where each run of generated text came from while it
//! writes; at the end the recorded mappings are resolved into a
//! [`SourceMapChunk`] that can be queried or turned into a v3 [`SourceMap`].

mod chunk;
mod line_index;
mod tracker;

pub use chunk::{Segment, SourceMapChunk};
pub use line_index::{LineCol, LineIndex};
pub use sourcemap::SourceMap;
pub use tracker::{Mapping, PositionTracker};

/// A byte offset into a source string.
pub type ByteOffset = text_size::TextSize;
