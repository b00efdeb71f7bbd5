//! Programmatic tree construction.

use crate::tree::{Element, NodeId, NodeKind, Tree};
use text_size::TextSize;

/// Builds a [`Tree`] in document order.
///
/// `open*` calls push a container, `close*` pops it, and leaf calls append to
/// whatever is currently open. Containers still open at [`finish`](Self::finish)
/// are closed without an end offset.
///
/// ```
/// use astro_ast::{Attribute, Element, TreeBuilder};
///
/// // <p id="x">hi</p>
/// let tree = TreeBuilder::new()
///     .open(Element::new("p").with_attribute(Attribute::quoted("id", "x", 3, 6)), 0)
///     .text(10, "hi")
///     .close_at(12)
///     .finish();
/// assert_eq!(tree.len(), 3);
/// ```
#[derive(Debug)]
pub struct TreeBuilder {
    tree: Tree,
    stack: Vec<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    /// Starts a new document.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            stack: vec![NodeId::ROOT],
        }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(NodeId::ROOT)
    }

    fn push(mut self, kind: NodeKind, loc: u32) -> Self {
        let id = self.tree.append(self.current(), kind, Some(TextSize::from(loc)));
        self.stack.push(id);
        self
    }

    fn leaf(mut self, kind: NodeKind, loc: u32) -> Self {
        self.tree.append(self.current(), kind, Some(TextSize::from(loc)));
        self
    }

    /// Opens the frontmatter fence.
    pub fn open_frontmatter(self, loc: u32) -> Self {
        self.push(NodeKind::Frontmatter, loc)
    }

    /// Opens an element; its children follow until the matching close.
    pub fn open(self, element: Element, loc: u32) -> Self {
        self.push(NodeKind::Element(element), loc)
    }

    /// Opens a `{...}` expression block.
    pub fn open_expression(self, loc: u32) -> Self {
        self.push(NodeKind::Element(Element::expression()), loc)
    }

    /// Appends a childless element.
    pub fn element(self, element: Element, loc: u32) -> Self {
        self.leaf(NodeKind::Element(element), loc)
    }

    /// Appends a text node.
    pub fn text(self, loc: u32, text: impl Into<String>) -> Self {
        self.leaf(NodeKind::Text(text.into()), loc)
    }

    /// Appends a comment node.
    pub fn comment(self, loc: u32, text: impl Into<String>) -> Self {
        self.leaf(NodeKind::Comment(text.into()), loc)
    }

    /// Appends a doctype node.
    pub fn doctype(self, loc: u32, text: impl Into<String>) -> Self {
        self.leaf(NodeKind::Doctype(text.into()), loc)
    }

    /// Closes the innermost open container without an end offset.
    pub fn close(mut self) -> Self {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
        self
    }

    /// Closes the innermost open element, recording where its closing tag sits.
    pub fn close_at(mut self, end_loc: u32) -> Self {
        if self.stack.len() > 1 {
            if let Some(id) = self.stack.pop() {
                if let Some(el) = self.tree.element_mut(id) {
                    el.end_loc = Some(TextSize::from(end_loc));
                }
            }
        }
        self
    }

    /// Returns the finished tree.
    pub fn finish(self) -> Tree {
        self.tree
    }
}
