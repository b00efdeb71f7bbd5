//! Loading trees from the compiler's JSON AST.
//!
//! The JSON carries node start/end offsets but no separate key/value offsets
//! for attributes or closing-tag offsets for elements; those are recovered from
//! the source text where it is unambiguous.

use crate::attribute::Attribute;
use crate::error::TreeError;
use crate::tree::{Element, NodeId, NodeKind, Tree};
use serde::Deserialize;
use source_map::ByteOffset;
use text_size::TextSize;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum JsonNode {
    Root(JsonParent),
    Element(JsonTag),
    Component(JsonTag),
    CustomElement(JsonTag),
    Fragment(JsonTag),
    Expression(JsonParent),
    Text(JsonLiteral),
    Frontmatter(JsonLiteral),
    Doctype(JsonLiteral),
    Comment(JsonLiteral),
}

impl JsonNode {
    fn type_name(&self) -> &'static str {
        match self {
            JsonNode::Root(_) => "root",
            JsonNode::Element(_) => "element",
            JsonNode::Component(_) => "component",
            JsonNode::CustomElement(_) => "custom-element",
            JsonNode::Fragment(_) => "fragment",
            JsonNode::Expression(_) => "expression",
            JsonNode::Text(_) => "text",
            JsonNode::Frontmatter(_) => "frontmatter",
            JsonNode::Doctype(_) => "doctype",
            JsonNode::Comment(_) => "comment",
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonParent {
    #[serde(default)]
    children: Vec<JsonNode>,
    #[serde(default)]
    position: Option<JsonPosition>,
}

#[derive(Debug, Deserialize)]
struct JsonTag {
    name: String,
    #[serde(default)]
    attributes: Vec<JsonAttribute>,
    #[serde(default)]
    children: Vec<JsonNode>,
    #[serde(default)]
    position: Option<JsonPosition>,
}

#[derive(Debug, Deserialize)]
struct JsonLiteral {
    #[serde(default)]
    value: String,
    #[serde(default)]
    position: Option<JsonPosition>,
}

#[derive(Debug, Deserialize)]
struct JsonAttribute {
    kind: JsonAttributeKind,
    name: String,
    #[serde(default)]
    value: String,
    #[serde(default)]
    position: Option<JsonPosition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum JsonAttributeKind {
    Quoted,
    Empty,
    Expression,
    Spread,
    Shorthand,
    TemplateLiteral,
}

#[derive(Debug, Deserialize)]
struct JsonPosition {
    start: JsonPoint,
    #[serde(default)]
    end: Option<JsonPoint>,
}

#[derive(Debug, Deserialize)]
struct JsonPoint {
    offset: u32,
}

/// Loads a tree from the JSON emitted by the compiler's `parse()`.
///
/// `source` is the document the JSON was produced from; every offset is checked
/// against it.
pub fn from_json(json: &str, source: &str) -> Result<Tree, TreeError> {
    let root: JsonNode = serde_json::from_str(json)?;
    let JsonNode::Root(root) = root else {
        return Err(TreeError::UnexpectedRoot {
            found: root.type_name(),
        });
    };

    let mut loader = Loader {
        source,
        tree: Tree::new(),
    };
    loader.children(NodeId::ROOT, root.children, true)?;
    tracing::debug!(nodes = loader.tree.len(), "loaded AST");
    Ok(loader.tree)
}

struct Loader<'s> {
    source: &'s str,
    tree: Tree,
}

impl Loader<'_> {
    fn children(&mut self, parent: NodeId, children: Vec<JsonNode>, top_level: bool) -> Result<(), TreeError> {
        for (index, child) in children.into_iter().enumerate() {
            self.node(parent, index, top_level, child)?;
        }
        Ok(())
    }

    fn node(&mut self, parent: NodeId, index: usize, top_level: bool, node: JsonNode) -> Result<(), TreeError> {
        match node {
            JsonNode::Root(_) => return Err(TreeError::NestedRoot),
            JsonNode::Frontmatter(lit) => {
                if !top_level || index != 0 {
                    return Err(TreeError::MisplacedFrontmatter { index });
                }
                let loc = self.start(&lit.position)?;
                let id = self.tree.append(parent, NodeKind::Frontmatter, loc);
                // The code itself starts after the opening fence.
                let text_loc = loc.map(|l| {
                    if self.source_has(l, "---") {
                        l + TextSize::from(3)
                    } else {
                        l
                    }
                });
                self.tree.append(id, NodeKind::Text(lit.value), text_loc);
            }
            JsonNode::Element(tag)
            | JsonNode::Component(tag)
            | JsonNode::CustomElement(tag)
            | JsonNode::Fragment(tag) => self.tag(parent, tag)?,
            JsonNode::Expression(expr) => {
                let loc = self.start(&expr.position)?;
                let end_loc = self
                    .end(&expr.position)?
                    .and_then(|end| end.checked_sub(TextSize::from(1)))
                    .filter(|&brace| self.source_has(brace, "}"));
                let element = Element {
                    expression: true,
                    end_loc,
                    ..Element::default()
                };
                let id = self.tree.append(parent, NodeKind::Element(element), loc);
                self.children(id, expr.children, false)?;
            }
            JsonNode::Text(lit) => {
                let loc = self.start(&lit.position)?;
                self.tree.append(parent, NodeKind::Text(lit.value), loc);
            }
            JsonNode::Comment(lit) => {
                let loc = self.start(&lit.position)?;
                self.tree.append(parent, NodeKind::Comment(lit.value), loc);
            }
            JsonNode::Doctype(lit) => {
                let loc = self.start(&lit.position)?;
                self.tree.append(parent, NodeKind::Doctype(lit.value), loc);
            }
        }
        Ok(())
    }

    fn tag(&mut self, parent: NodeId, tag: JsonTag) -> Result<(), TreeError> {
        let loc = self.start(&tag.position)?;
        let attributes = tag
            .attributes
            .into_iter()
            .map(|attr| self.attribute(attr, loc))
            .collect::<Result<Vec<_>, _>>()?;

        let closing = format!("</{}>", tag.name);
        let end_loc = self
            .end(&tag.position)?
            .and_then(|end| end.checked_sub(TextSize::from(closing.len() as u32)))
            .filter(|&at| self.source_has(at, &closing));
        if end_loc.is_none() {
            tracing::trace!(name = %tag.name, "no explicit closing tag");
        }

        let element = Element {
            name: tag.name.into(),
            attributes,
            expression: false,
            end_loc,
        };
        let id = self.tree.append(parent, NodeKind::Element(element), loc);
        self.children(id, tag.children, false)
    }

    fn attribute(&self, attr: JsonAttribute, element_loc: Option<ByteOffset>) -> Result<Attribute, TreeError> {
        let start = match &attr.position {
            Some(position) => self.offset(&position.start)?,
            None => element_loc.unwrap_or_default(),
        };
        let key_loc = u32::from(start);
        // `name=` precedes the value for the keyed forms.
        let value_loc = key_loc + attr.name.len() as u32 + 1;

        Ok(match attr.kind {
            JsonAttributeKind::Quoted => Attribute::quoted(attr.name, attr.value, key_loc, value_loc),
            JsonAttributeKind::Empty => Attribute::empty(attr.name, key_loc),
            JsonAttributeKind::Expression => {
                Attribute::expression(attr.name, attr.value, key_loc, value_loc)
            }
            JsonAttributeKind::TemplateLiteral => {
                Attribute::template_literal(attr.name, attr.value, key_loc, value_loc)
            }
            JsonAttributeKind::Shorthand => {
                let inner = if self.source_has(start, "{") { key_loc + 1 } else { key_loc };
                Attribute::shorthand(attr.name, inner)
            }
            JsonAttributeKind::Spread => {
                let expr = if attr.value.is_empty() { attr.name } else { attr.value };
                let inner = if self.source_has(start, "{...") { key_loc + 4 } else { key_loc };
                Attribute::spread(expr, key_loc, inner)
            }
        })
    }

    fn offset(&self, point: &JsonPoint) -> Result<ByteOffset, TreeError> {
        if point.offset as usize > self.source.len() {
            return Err(TreeError::OffsetOutOfBounds {
                offset: point.offset,
                len: self.source.len() as u32,
            });
        }
        Ok(TextSize::from(point.offset))
    }

    fn start(&self, position: &Option<JsonPosition>) -> Result<Option<ByteOffset>, TreeError> {
        position.as_ref().map(|p| self.offset(&p.start)).transpose()
    }

    fn end(&self, position: &Option<JsonPosition>) -> Result<Option<ByteOffset>, TreeError> {
        position
            .as_ref()
            .and_then(|p| p.end.as_ref())
            .map(|end| self.offset(end))
            .transpose()
    }

    fn source_has(&self, at: ByteOffset, text: &str) -> bool {
        self.source
            .get(usize::from(at)..)
            .is_some_and(|rest| rest.starts_with(text))
    }
}
