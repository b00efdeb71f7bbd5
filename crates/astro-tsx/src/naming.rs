//! Component naming.

/// Suffix appended to every generated component name.
pub const COMPONENT_SUFFIX: &str = "__AstroComponent_";

/// Derives the exported component's name from the document's filename.
///
/// The last path segment is cut at its first `.`, converted to PascalCase and
/// given [`COMPONENT_SUFFIX`]. Without a filename (or for `<stdin>`) the name
/// is the bare suffix.
///
/// ```
/// use astro_tsx::component_name;
///
/// assert_eq!(component_name(Some("/Users/nmoo/test.astro")), "Test__AstroComponent_");
/// assert_eq!(component_name(None), "__AstroComponent_");
/// ```
pub fn component_name(filename: Option<&str>) -> String {
    let stem = filename
        .filter(|f| !f.is_empty() && *f != "<stdin>")
        .and_then(|f| f.rsplit(['/', '\\']).next())
        .and_then(|base| base.split('.').next())
        .unwrap_or_default();

    let mut name = pascal_case(stem);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name.push_str(COMPONENT_SUFFIX);
    name
}

/// Converts to PascalCase, dropping characters that cannot appear in an identifier.
fn pascal_case(stem: &str) -> String {
    let mut result = String::with_capacity(stem.len() + COMPONENT_SUFFIX.len());
    let mut capitalize_next = true;

    for c in stem.chars() {
        if c.is_alphanumeric() || c == '$' {
            if capitalize_next {
                result.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                result.push(c);
            }
        } else {
            // `-`, `_`, `+`, `[` and friends start a new word
            capitalize_next = true;
        }
    }

    result
}
