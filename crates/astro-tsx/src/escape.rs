//! Text escaping for the TSX output.

use std::borrow::Cow;

/// Escapes text for the inside of a JavaScript template literal.
///
/// Backslashes, backticks and `${` are escaped; a lone `$` is left alone.
pub fn escape_template_literal(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '`']) && !text.contains("${") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Escapes `{` and `}` with a backslash.
pub fn escape_braces(text: &str) -> Cow<'_, str> {
    if !text.contains(['{', '}']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 4);
    for c in text.chars() {
        if matches!(c, '{' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    Cow::Owned(out)
}

/// Brace-escapes a comment body and breaks up any `*/` so the body cannot close
/// the `{/** ... */}` wrapper early.
pub(crate) fn escape_comment(text: &str) -> Cow<'_, str> {
    match escape_braces(text) {
        Cow::Borrowed(text) if !text.contains("*/") => Cow::Borrowed(text),
        escaped => Cow::Owned(escaped.replace("*/", "*\\/")),
    }
}

/// Replaces `"` with `&quot;` for use inside a double-quoted attribute.
pub fn encode_double_quote(text: &str) -> Cow<'_, str> {
    if text.contains('"') {
        Cow::Owned(text.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Removes `//` line comments and `/* */` block comments, then trims whitespace.
///
/// An unterminated block comment runs to the end of the text. String literals
/// are not tracked.
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("//") {
            rest = match after.find('\n') {
                Some(newline) => &after[newline..],
                None => "",
            };
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = match after.find("*/") {
                Some(close) => &after[close + 2..],
                None => "",
            };
        } else {
            let next = rest.find('/').map_or(rest.len(), |i| i.max(1));
            out.push_str(&rest[..next]);
            rest = &rest[next..];
        }
    }

    out.trim().to_string()
}
