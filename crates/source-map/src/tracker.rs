//! Position tracking while generated code is being written.

use crate::chunk::{Segment, SourceMapChunk};
use crate::{ByteOffset, LineIndex};

/// A single recorded mapping.
///
/// `original` is `None` for synthetic output that has no traceable origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mapping {
    /// Offset in the generated output where this mapping takes effect.
    pub generated: ByteOffset,
    /// Offset in the original source, if any.
    pub original: Option<ByteOffset>,
}

impl Mapping {
    /// Returns true if this mapping has no origin.
    #[inline]
    pub fn is_nil(&self) -> bool {
        self.original.is_none()
    }
}

/// Records (generated offset → original offset) mappings for one print pass.
///
/// The printer owns the output buffer and reports its current length with each
/// call. A mapping takes effect at that offset and lasts until the next one.
#[derive(Debug, Clone)]
pub struct PositionTracker {
    source_index: LineIndex,
    mappings: Vec<Mapping>,
}

impl PositionTracker {
    /// Creates a tracker for the given original source text.
    pub fn new(source: &str) -> Self {
        Self {
            source_index: LineIndex::new(source),
            mappings: Vec::new(),
        }
    }

    /// Returns the line index of the original source.
    #[inline]
    pub fn source_index(&self) -> &LineIndex {
        &self.source_index
    }

    /// Records that output written from `generated` on comes from `original`.
    pub fn add_mapping(&mut self, generated: ByteOffset, original: ByteOffset) {
        self.push(Mapping {
            generated,
            original: Some(original),
        });
    }

    /// Records that output written from `generated` on has no origin.
    pub fn add_nil_mapping(&mut self, generated: ByteOffset) {
        // A nil run is already open.
        if self.mappings.last().is_some_and(Mapping::is_nil) {
            return;
        }
        self.push(Mapping {
            generated,
            original: None,
        });
    }

    fn push(&mut self, mapping: Mapping) {
        match self.mappings.last_mut() {
            // Nothing was written since the previous mapping: the newer one wins.
            Some(last) if last.generated == mapping.generated => *last = mapping,
            _ => self.mappings.push(mapping),
        }
    }

    /// Returns the mappings recorded so far, in emission order.
    #[inline]
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Resolves recorded mappings against the final output text.
    ///
    /// Columns in the produced chunk are UTF-16 code units. A mapping whose
    /// original offset lies past the end of the source becomes a nil segment.
    pub fn generate_chunk(&self, output: &str) -> SourceMapChunk {
        let output_index = LineIndex::new(output);
        let mut segments = Vec::with_capacity(self.mappings.len());

        for mapping in &self.mappings {
            let Some(generated) = output_index.line_col_utf16(mapping.generated) else {
                continue;
            };
            let original = mapping
                .original
                .and_then(|offset| self.source_index.line_col_utf16(offset).map(|lc| (offset, lc)));

            segments.push(Segment {
                generated_offset: mapping.generated,
                generated,
                original_offset: original.map(|(offset, _)| offset),
                original: original.map(|(_, lc)| lc),
                name: None,
            });
        }

        SourceMapChunk::new(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LineCol;
    use text_size::TextSize;

    fn offset(n: u32) -> ByteOffset {
        TextSize::from(n)
    }

    #[test]
    fn test_replaces_mapping_at_same_offset() {
        let mut tracker = PositionTracker::new("abcdef");
        tracker.add_mapping(offset(0), offset(1));
        tracker.add_mapping(offset(0), offset(3));
        assert_eq!(
            tracker.mappings(),
            &[Mapping {
                generated: offset(0),
                original: Some(offset(3)),
            }]
        );
    }

    #[test]
    fn test_collapses_nil_runs() {
        let mut tracker = PositionTracker::new("abc");
        tracker.add_nil_mapping(offset(0));
        tracker.add_nil_mapping(offset(4));
        tracker.add_mapping(offset(6), offset(1));
        tracker.add_nil_mapping(offset(7));

        let nil_count = tracker.mappings().iter().filter(|m| m.is_nil()).count();
        assert_eq!(nil_count, 2);
        assert_eq!(tracker.mappings().len(), 3);
    }

    #[test]
    fn test_generate_chunk_positions() {
        let source = "---\nlet a = 1;\n---\n<p>hi</p>";
        let mut tracker = PositionTracker::new(source);
        let mut output = String::new();

        tracker.add_mapping(offset(output.len() as u32), offset(4));
        output.push_str("let a = 1;\n");
        tracker.add_nil_mapping(offset(output.len() as u32));
        output.push_str("<Fragment>\n");
        tracker.add_mapping(offset(output.len() as u32), offset(19));
        output.push_str("<p>hi</p>");

        let chunk = tracker.generate_chunk(&output);
        let segments: Vec<_> = chunk.segments().collect();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].generated, LineCol::new(0, 0));
        assert_eq!(segments[0].original, Some(LineCol::new(1, 0)));
        assert_eq!(segments[1].generated, LineCol::new(1, 0));
        assert_eq!(segments[1].original, None);
        assert_eq!(segments[2].generated, LineCol::new(2, 0));
        assert_eq!(segments[2].original, Some(LineCol::new(3, 0)));
    }

    #[test]
    fn test_out_of_range_original_becomes_nil() {
        let mut tracker = PositionTracker::new("ab");
        tracker.add_mapping(offset(0), offset(40));
        let chunk = tracker.generate_chunk("xyz");
        assert_eq!(chunk.segments().next().map(|s| s.original), Some(None));
    }
}
