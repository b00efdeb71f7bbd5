//! Attribute printing.
//!
//! Ordinary attributes are printed in place as JSX attributes. Directive
//! attributes (keys starting with `@`) cannot be written as JSX names, so they
//! are collected and printed after the rest as one object spread.

use crate::escape::{encode_double_quote, escape_template_literal, strip_comments};
use crate::printer::{Printer, ShorthandPolicy};
use astro_ast::{Attribute, AttributeValue, DIRECTIVE_MARKER};
use std::ops::ControlFlow;
use text_size::TextSize;

/// Prints an element's attributes.
///
/// Breaks when a comment-only shorthand attribute aborts the element; the
/// caller must then stop printing it.
pub(crate) fn print_attributes(p: &mut Printer<'_>, attributes: &[Attribute]) -> ControlFlow<()> {
    let mut deferred = Vec::new();
    for attr in attributes {
        if attr.is_directive() {
            deferred.push(attr);
        } else {
            print_inline(p, attr)?;
        }
    }
    print_deferred(p, &deferred)
}

/// Decides the fate of a shorthand attribute whose name holds only comments.
fn comment_only_shorthand(p: &Printer<'_>, key: &str) -> Option<ControlFlow<()>> {
    if !strip_comments(key).is_empty() {
        return None;
    }
    tracing::trace!(key, "comment-only shorthand attribute");
    Some(match p.options.shorthand_policy {
        ShorthandPolicy::AbortElement => ControlFlow::Break(()),
        ShorthandPolicy::SkipAttribute => ControlFlow::Continue(()),
    })
}

fn print_inline(p: &mut Printer<'_>, attr: &Attribute) -> ControlFlow<()> {
    if matches!(attr.value, AttributeValue::Shorthand) {
        if let Some(flow) = comment_only_shorthand(p, &attr.key) {
            return flow;
        }
    }

    p.print(" ");
    if let Some(namespace) = &attr.namespace {
        p.print(namespace);
        p.print(":");
    }

    match &attr.value {
        AttributeValue::Quoted(value) => {
            p.add_mapping(attr.key_loc);
            p.print(&attr.key);
            p.print("=");
            p.add_mapping(attr.value_loc);
            p.print("\"");
            p.print(&encode_double_quote(value));
            p.print("\"");
        }
        AttributeValue::Empty => {
            p.add_mapping(attr.key_loc);
            p.print(&attr.key);
        }
        AttributeValue::Expression(expr) => {
            p.add_mapping(attr.key_loc);
            p.print(&attr.key);
            p.print("=");
            p.add_mapping(attr.value_loc);
            p.print("{");
            p.print(expr);
            p.print("}");
        }
        AttributeValue::Spread(expr) => {
            if !attr.key.is_empty() {
                p.add_mapping(attr.key_loc);
                p.print(&attr.key);
                p.print("=");
            }
            p.add_mapping(attr.value_loc);
            p.print("{...");
            p.print(expr);
            p.print("}");
        }
        AttributeValue::Shorthand => {
            p.add_mapping(attr.key_loc);
            p.print(&attr.key);
            p.print("=");
            p.add_mapping(attr.key_loc);
            p.print("{");
            p.print(&attr.key);
            p.print("}");
        }
        AttributeValue::TemplateLiteral(body) => {
            p.add_mapping(attr.key_loc);
            p.print(&attr.key);
            p.print("=");
            p.add_mapping(attr.value_loc);
            p.print("{`");
            p.print(&escape_template_literal(body));
            p.print("`}");
        }
    }
    ControlFlow::Continue(())
}

/// Prints directive attributes as ` {...{"key": value, ...}}`.
fn print_deferred(p: &mut Printer<'_>, deferred: &[&Attribute]) -> ControlFlow<()> {
    if deferred.is_empty() {
        return ControlFlow::Continue(());
    }

    p.add_nil_mapping();
    p.print(" {...{");
    let mut first = true;
    for attr in deferred {
        let key = attr
            .key
            .strip_prefix(DIRECTIVE_MARKER)
            .unwrap_or(attr.key.as_str());
        if matches!(attr.value, AttributeValue::Shorthand) {
            if let Some(flow) = comment_only_shorthand(p, key) {
                flow?;
                continue;
            }
        }
        if !first {
            p.print(", ");
        }
        first = false;
        print_deferred_entry(p, attr, key);
    }
    p.add_nil_mapping();
    p.print("}}");
    ControlFlow::Continue(())
}

fn print_deferred_entry(p: &mut Printer<'_>, attr: &Attribute, key: &str) {
    // The key is printed without its marker, so its mapping moves past it.
    let key_loc = if key.len() < attr.key.len() {
        attr.key_loc + TextSize::of(DIRECTIVE_MARKER)
    } else {
        attr.key_loc
    };

    let print_key = |p: &mut Printer<'_>| {
        p.print("\"");
        p.add_mapping(key_loc);
        if let Some(namespace) = &attr.namespace {
            p.print(namespace);
            p.print(":");
        }
        p.print(key);
        p.print("\": ");
    };

    match &attr.value {
        AttributeValue::Quoted(value) => {
            print_key(p);
            p.add_mapping(attr.value_loc);
            p.print("\"");
            p.print(&encode_double_quote(value));
            p.print("\"");
        }
        AttributeValue::Empty => {
            print_key(p);
            p.print("true");
        }
        AttributeValue::Expression(expr) => {
            print_key(p);
            p.add_mapping(attr.value_loc);
            p.print("(");
            p.print(expr);
            p.print(")");
        }
        AttributeValue::Spread(expr) => {
            p.add_mapping(attr.value_loc);
            p.print("...");
            p.print(expr);
        }
        AttributeValue::Shorthand => {
            p.add_mapping(key_loc);
            p.print(key);
        }
        AttributeValue::TemplateLiteral(body) => {
            print_key(p);
            p.add_mapping(attr.value_loc);
            p.print("`");
            p.print(&escape_template_literal(body));
            p.print("`");
        }
    }
}
