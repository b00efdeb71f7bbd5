//! Raw-text context classification.

use astro_ast::NodeRef;

/// `type` values that make a `<script>` hold executable code.
pub const SCRIPT_MIME_TYPES: [&str; 5] = [
    "module",
    "text/typescript",
    "application/javascript",
    "text/partytown",
    "application/node",
];

/// How a brace-bearing text node is wrapped in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextContext {
    /// Printed as a template-literal string.
    Raw,
    /// Printed as the body of an arrow function.
    Script,
}

/// Classifies a text node by its nearest enclosing `<script>`.
///
/// The node is [`TextContext::Script`] when that script's `type` attribute is
/// one of [`SCRIPT_MIME_TYPES`]; otherwise, and when there is no enclosing
/// script at all, it is [`TextContext::Raw`].
pub fn classify(node: NodeRef<'_>) -> TextContext {
    let script_type = node
        .closest(is_script)
        .and_then(|script| script.as_element())
        .and_then(|el| el.attribute("type"));

    match script_type {
        Some(attr) if is_script_mime_type(attr.raw_value()) => TextContext::Script,
        _ => TextContext::Raw,
    }
}

/// Returns true if `value` is a script MIME type, ignoring ASCII case.
pub fn is_script_mime_type(value: &str) -> bool {
    SCRIPT_MIME_TYPES
        .iter()
        .any(|mime| mime.eq_ignore_ascii_case(value))
}

fn is_script(node: &NodeRef<'_>) -> bool {
    node.as_element()
        .is_some_and(|el| !el.expression && el.name.eq_ignore_ascii_case("script"))
}
