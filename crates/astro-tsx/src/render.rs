//! Tree walk producing the TSX text.

use crate::attributes::print_attributes;
use crate::classify::{classify, TextContext};
use crate::escape::{escape_braces, escape_comment, escape_template_literal, strip_comments};
use crate::naming::component_name;
use crate::printer::Printer;
use astro_ast::{Element, NodeKind, NodeRef};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.contains(&name)
}

pub(crate) fn render_node(p: &mut Printer<'_>, node: NodeRef<'_>) {
    match node.kind() {
        NodeKind::Document => render_document(p, node),
        NodeKind::Frontmatter => render_frontmatter(p, node),
        NodeKind::Text(text) => render_text(p, node, text),
        NodeKind::Comment(text) => render_comment(p, node, text),
        NodeKind::Element(el) if el.expression => render_expression(p, node, el),
        NodeKind::Element(el) if el.is_implicit() => render_children(p, node),
        NodeKind::Element(el) => render_element(p, node, el),
        NodeKind::Doctype(_) => tracing::trace!("skipping doctype"),
    }
}

fn render_children(p: &mut Printer<'_>, node: NodeRef<'_>) {
    for child in node.children() {
        render_node(p, child);
    }
}

fn open_fragment(p: &mut Printer<'_>) {
    p.add_nil_mapping();
    p.print("<Fragment>\n");
}

fn render_document(p: &mut Printer<'_>, node: NodeRef<'_>) {
    let has_frontmatter = node
        .first_child()
        .is_some_and(|child| matches!(child.kind(), NodeKind::Frontmatter));
    if !has_frontmatter {
        open_fragment(p);
    }

    render_children(p, node);

    p.add_nil_mapping();
    p.print("\n</Fragment>");

    let props = if p.has_typed_props {
        "Props"
    } else {
        "Record<string, any>"
    };
    let name = component_name(p.options.filename.as_deref());
    p.print(&format!(
        "\n\nexport default function {name}(_props: {props}): any {{}}\n"
    ));
}

/// Copies frontmatter code through unchanged and opens the markup fragment.
fn render_frontmatter(p: &mut Printer<'_>, node: NodeRef<'_>) {
    for child in node.children() {
        match child.kind() {
            NodeKind::Text(code) => {
                if code.contains("Props") {
                    p.has_typed_props = true;
                }
                p.add_optional_mapping(child.loc());
                p.print(code);
            }
            _ => render_node(p, child),
        }
    }
    open_fragment(p);
}

fn render_text(p: &mut Printer<'_>, node: NodeRef<'_>, text: &str) {
    if text.trim().is_empty() || !text.contains(['{', '}']) {
        p.add_optional_mapping(node.loc());
        p.print(text);
        return;
    }

    match classify(node) {
        TextContext::Raw => {
            p.print("{`");
            p.add_optional_mapping(node.loc());
            p.print(&escape_template_literal(text));
            p.add_nil_mapping();
            p.print("`}");
        }
        TextContext::Script => {
            p.print("{() => {");
            p.add_optional_mapping(node.loc());
            p.print(text);
            p.add_nil_mapping();
            p.print("}}");
        }
    }
}

fn render_comment(p: &mut Printer<'_>, node: NodeRef<'_>, text: &str) {
    p.add_optional_mapping(node.loc());
    p.print("{/**");
    p.print(&escape_comment(text));
    p.print("*/}");
}

/// Returns true if every child is a comment, or text holding nothing but
/// comments, and at least one comment is present.
fn is_comment_only(node: NodeRef<'_>) -> bool {
    let mut saw_comment = false;
    for child in node.children() {
        match child.kind() {
            NodeKind::Comment(_) => saw_comment = true,
            NodeKind::Text(text) => {
                if !strip_comments(text).is_empty() {
                    return false;
                }
                saw_comment |= text.contains("/*") || text.contains("//");
            }
            _ => return false,
        }
    }
    saw_comment
}

fn render_expression(p: &mut Printer<'_>, node: NodeRef<'_>, el: &Element) {
    if !node.has_children() {
        p.print("{(void 0)");
    } else if is_comment_only(node) {
        tracing::trace!("dropping comment-only expression");
        return;
    } else {
        p.print("{");
    }

    for child in node.children() {
        p.add_optional_mapping(child.loc());
        if let Some(text) = child.as_text() {
            p.print(&escape_braces(text));
            continue;
        }

        // Markup inside an expression needs a single JSX root.
        if child.prev_sibling().map_or(true, |prev| prev.is_text()) {
            p.print("<Fragment>");
        }
        render_node(p, child);
        if child.next_sibling().map_or(true, |next| next.is_text()) {
            p.print("</Fragment>");
        }
    }

    if let Some(end_loc) = el.end_loc {
        p.add_mapping(end_loc);
    }
    p.print("}");
}

fn render_element(p: &mut Printer<'_>, node: NodeRef<'_>, el: &Element) {
    p.add_optional_mapping(node.loc());
    p.print("<");
    p.print(&el.name);

    if print_attributes(p, &el.attributes).is_break() {
        tracing::debug!(element = %el.name, "element aborted at a comment-only shorthand attribute");
        return;
    }

    if is_void_element(&el.name) && !node.has_children() {
        p.print("/>");
        return;
    }
    p.print(">");

    render_children(p, node);

    p.add_optional_mapping(el.end_loc.or(node.loc()));
    p.print("</");
    p.print(&el.name);
    p.print(">");
}

#[cfg(test)]
mod tests {
    use super::*;
    use astro_ast::{Attribute, TreeBuilder};

    #[test]
    fn test_void_elements() {
        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("IMG"));
        assert!(!is_void_element("Link"));
        assert!(!is_void_element("div"));
        assert!(!is_void_element("template"));
    }

    #[test]
    fn test_comment_only_detection() {
        let tree = TreeBuilder::new()
            .open_expression(0)
            .comment(1, " a ")
            .close_at(9)
            .open_expression(10)
            .text(11, "/* b */ ")
            .close_at(19)
            .open_expression(20)
            .text(21, "   ")
            .close_at(24)
            .open_expression(25)
            .text(26, "/* c */ x")
            .close_at(35)
            .open_expression(36)
            .comment(37, " d ")
            .element(Element::new("br"), 45)
            .close_at(50)
            .finish();

        let verdicts: Vec<bool> = tree.root().children().map(is_comment_only).collect();
        assert_eq!(verdicts, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_implicit_element_is_transparent() {
        let tree = TreeBuilder::new()
            .open(Element::new("body").with_attribute(Attribute::implicit_marker()), 0)
            .text(0, "hi")
            .close()
            .finish();

        let options = crate::TsxOptions::default();
        let mut p = Printer::new("hi", &options);
        render_node(&mut p, tree.root().first_child().unwrap());
        assert_eq!(p.finish().code, "hi");
    }
}
