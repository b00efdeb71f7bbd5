//! Printer state and the public entry point.

use crate::render;
use astro_ast::NodeRef;
use source_map::{ByteOffset, PositionTracker, SourceMapChunk};
use text_size::TextSize;

/// What to do with a shorthand attribute whose name is nothing but comments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShorthandPolicy {
    /// Stop rendering the element at that attribute: the tag is left open and
    /// neither its children nor its closing tag are printed.
    #[default]
    AbortElement,
    /// Drop the attribute and keep going.
    SkipAttribute,
}

/// Options for printing.
#[derive(Debug, Clone, Default)]
pub struct TsxOptions {
    /// The filename of the source document, used to name the component.
    pub filename: Option<String>,
    /// Handling of comment-only shorthand attributes.
    pub shorthand_policy: ShorthandPolicy,
}

impl TsxOptions {
    /// Options for the given filename with defaults otherwise.
    pub fn with_filename(filename: impl Into<String>) -> Self {
        Self {
            filename: Some(filename.into()),
            ..Self::default()
        }
    }
}

/// The result of printing.
#[derive(Debug, Clone)]
pub struct PrintResult {
    /// The generated TSX module.
    pub code: String,
    /// Mappings from `code` back into the source document.
    pub chunk: SourceMapChunk,
}

/// Prints a template tree as a TSX module.
///
/// `source` must be the text the tree's offsets refer to. `root` is normally
/// the document node; any other node is printed as a fragment of its own,
/// without the surrounding `<Fragment>` and component export.
pub fn print_to_tsx(source: &str, root: NodeRef<'_>, options: &TsxOptions) -> PrintResult {
    let _span = tracing::debug_span!(
        "print_to_tsx",
        filename = options.filename.as_deref().unwrap_or("<stdin>")
    )
    .entered();

    let mut printer = Printer::new(source, options);
    render::render_node(&mut printer, root);
    let result = printer.finish();

    tracing::debug!(
        bytes = result.code.len(),
        segments = result.chunk.len(),
        "printed TSX"
    );
    result
}

/// Output buffer plus the mappings recorded while writing it.
pub(crate) struct Printer<'o> {
    pub(crate) options: &'o TsxOptions,
    /// Set when frontmatter code mentions `Props`.
    pub(crate) has_typed_props: bool,
    output: String,
    tracker: PositionTracker,
}

impl<'o> Printer<'o> {
    pub(crate) fn new(source: &str, options: &'o TsxOptions) -> Self {
        Self {
            options,
            has_typed_props: false,
            output: String::with_capacity(source.len() * 2),
            tracker: PositionTracker::new(source),
        }
    }

    /// Current end of the output.
    fn position(&self) -> ByteOffset {
        TextSize::of(self.output.as_str())
    }

    pub(crate) fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }

    /// Maps output written from here on to `loc` in the source.
    pub(crate) fn add_mapping(&mut self, loc: ByteOffset) {
        let generated = self.position();
        self.tracker.add_mapping(generated, loc);
    }

    /// Marks output written from here on as synthetic.
    pub(crate) fn add_nil_mapping(&mut self) {
        let generated = self.position();
        self.tracker.add_nil_mapping(generated);
    }

    /// Maps to `loc`, or marks as synthetic when the node has no position.
    pub(crate) fn add_optional_mapping(&mut self, loc: Option<ByteOffset>) {
        match loc {
            Some(loc) => self.add_mapping(loc),
            None => self.add_nil_mapping(),
        }
    }

    pub(crate) fn finish(self) -> PrintResult {
        let chunk = self.tracker.generate_chunk(&self.output);
        PrintResult {
            code: self.output,
            chunk,
        }
    }
}
