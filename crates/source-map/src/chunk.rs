//! A finished source map chunk for one print pass.

use crate::{ByteOffset, LineCol};
use sourcemap::{SourceMap, SourceMapBuilder};

/// One mapping segment, resolved to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Byte offset in the generated output.
    pub generated_offset: ByteOffset,
    /// Position in the generated output (UTF-16 columns).
    pub generated: LineCol,
    /// Byte offset in the original source, `None` for synthetic output.
    pub original_offset: Option<ByteOffset>,
    /// Position in the original source (UTF-16 columns).
    pub original: Option<LineCol>,
    /// Optional symbol name.
    pub name: Option<String>,
}

impl Segment {
    /// Returns true if this segment has no origin.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.original.is_none()
    }
}

/// The position-mapping stream of one generated file.
///
/// Segments are sorted by generated position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMapChunk {
    segments: Vec<Segment>,
}

impl SourceMapChunk {
    /// Creates a chunk from segments in generated order.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Returns the number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if there are no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over all segments.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Finds the original byte offset for a generated byte offset.
    ///
    /// The covering segment is the last one starting at or before `generated`;
    /// the distance from its start is carried over to the original side.
    /// Returns `None` inside synthetic output.
    pub fn original_offset(&self, generated: ByteOffset) -> Option<ByteOffset> {
        let idx = self
            .segments
            .partition_point(|s| s.generated_offset <= generated)
            .checked_sub(1)?;
        let segment = &self.segments[idx];
        let original = segment.original_offset?;
        Some(original + (generated - segment.generated_offset))
    }

    /// Finds the original line/column for a generated line/column.
    ///
    /// Only segments on the same generated line are considered.
    pub fn original_position(&self, generated: LineCol) -> Option<LineCol> {
        let idx = self
            .segments
            .partition_point(|s| s.generated <= generated)
            .checked_sub(1)?;
        let segment = &self.segments[idx];
        if segment.generated.line != generated.line {
            return None;
        }
        let original = segment.original?;
        Some(LineCol::new(
            original.line,
            original.col + (generated.col - segment.generated.col),
        ))
    }

    /// Builds a v3 source map for this chunk with `source` as its only source.
    ///
    /// Nil segments are added without a source so they terminate the
    /// preceding mapping.
    pub fn to_source_map(
        &self,
        file: &str,
        source: &str,
        source_content: Option<&str>,
    ) -> SourceMap {
        let mut builder = SourceMapBuilder::new(Some(file));
        let src_id = builder.add_source(source.into());
        builder.set_source_contents(src_id, source_content.map(Into::into));

        for segment in &self.segments {
            let name = segment.name.as_deref().map(|n| builder.add_name(n.into()));
            match segment.original {
                Some(original) => builder.add_raw(
                    segment.generated.line,
                    segment.generated.col,
                    original.line,
                    original.col,
                    Some(src_id),
                    name,
                    false,
                ),
                None => builder.add_raw(
                    segment.generated.line,
                    segment.generated.col,
                    0,
                    0,
                    None,
                    None,
                    false,
                ),
            };
        }

        builder.into_sourcemap()
    }
}
