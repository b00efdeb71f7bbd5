//! Line index for offset ↔ line/column conversion.
//!
//! Columns come in two flavours: byte columns (what the renderer works in) and
//! UTF-16 columns (what source map consumers and TypeScript expect).

use crate::ByteOffset;
use text_size::TextSize;

/// A line and column position (0-indexed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineCol {
    /// 0-indexed line number.
    pub line: u32,
    /// 0-indexed column.
    pub col: u32,
}

impl LineCol {
    /// Creates a new line/column position.
    #[inline]
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

/// A character that takes a different number of bytes in UTF-8 than code units in UTF-16.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WideChar {
    /// Byte column of the character within its line.
    start: u32,
    /// Length in UTF-8 bytes.
    utf8_len: u32,
    /// Length in UTF-16 code units.
    utf16_len: u32,
}

/// An index for converting between byte offsets and line/column positions.
///
/// Stores the start of every line plus, for lines containing non-ASCII text, the
/// characters whose UTF-8 and UTF-16 widths differ. Lookups are O(log n).
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// `line_starts[i]` is the offset where line `i` begins.
    line_starts: Vec<ByteOffset>,
    /// Wide characters per line, only populated for lines that have any.
    wide_chars: Vec<(u32, Vec<WideChar>)>,
    len: ByteOffset,
}

impl LineIndex {
    /// Creates a new line index from source text.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::from(0)];
        let mut wide_chars = Vec::new();
        let mut current: Vec<WideChar> = Vec::new();
        let mut line = 0u32;
        let mut line_start = 0usize;

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                if !current.is_empty() {
                    wide_chars.push((line, std::mem::take(&mut current)));
                }
                line += 1;
                line_start = offset + 1;
                line_starts.push(TextSize::from(line_start as u32));
                continue;
            }

            if !c.is_ascii() {
                current.push(WideChar {
                    start: (offset - line_start) as u32,
                    utf8_len: c.len_utf8() as u32,
                    utf16_len: c.len_utf16() as u32,
                });
            }
        }
        if !current.is_empty() {
            wide_chars.push((line, current));
        }

        Self {
            line_starts,
            wide_chars,
            len: TextSize::from(text.len() as u32),
        }
    }

    /// Returns the number of lines in the source.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Returns the length of the indexed text.
    #[inline]
    pub fn len(&self) -> ByteOffset {
        self.len
    }

    /// Returns true if the indexed text was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == TextSize::from(0)
    }

    /// Converts a byte offset to a line/byte-column position.
    ///
    /// Returns `None` if the offset is past the end of the text.
    pub fn line_col(&self, offset: ByteOffset) -> Option<LineCol> {
        if offset > self.len {
            return None;
        }

        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };

        let col = u32::from(offset) - u32::from(self.line_starts[line]);
        Some(LineCol {
            line: line as u32,
            col,
        })
    }

    /// Converts a byte offset to a line/UTF-16-column position.
    pub fn line_col_utf16(&self, offset: ByteOffset) -> Option<LineCol> {
        let LineCol { line, col } = self.line_col(offset)?;
        Some(LineCol {
            line,
            col: self.utf8_to_utf16_col(line, col),
        })
    }

    /// Converts a line/byte-column position to a byte offset.
    ///
    /// Returns `None` if the line is out of bounds.
    pub fn offset(&self, line_col: LineCol) -> Option<ByteOffset> {
        let line_start = self.line_starts.get(line_col.line as usize)?;
        Some(*line_start + TextSize::from(line_col.col))
    }

    /// Returns the byte offset where a line starts.
    pub fn line_start(&self, line: u32) -> Option<ByteOffset> {
        self.line_starts.get(line as usize).copied()
    }

    /// Translates a byte column on `line` into UTF-16 code units.
    pub fn utf8_to_utf16_col(&self, line: u32, col: u32) -> u32 {
        let Some(chars) = self.wide_chars_on(line) else {
            return col;
        };

        let mut res = col;
        for c in chars {
            if c.start >= col {
                break;
            }
            res -= c.utf8_len - c.utf16_len;
        }
        res
    }

    fn wide_chars_on(&self, line: u32) -> Option<&[WideChar]> {
        self.wide_chars
            .binary_search_by_key(&line, |(l, _)| *l)
            .ok()
            .map(|idx| self.wide_chars[idx].1.as_slice())
    }
}
