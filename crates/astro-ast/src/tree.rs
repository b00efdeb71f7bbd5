//! The document tree.
//!
//! All nodes live in one arena owned by [`Tree`]. Children are stored as ordered
//! id lists and every node keeps its parent's id and its index among its
//! siblings, so navigation in every direction is cheap and needs no shared
//! ownership. [`NodeRef`] is the borrowed cursor used to walk the tree.

use crate::attribute::Attribute;
use smol_str::SmolStr;
use source_map::ByteOffset;
use std::fmt;

/// Identifies a node within its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The root document node of every tree.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// The tree root.
    Document,
    /// The leading `---` code fence. Only ever the first child of the root.
    Frontmatter,
    /// `<!doctype ...>`
    Doctype(String),
    /// A tag or a `{...}` expression block.
    Element(Element),
    /// Raw text.
    Text(String),
    /// `<!-- ... -->`
    Comment(String),
}

impl NodeKind {
    /// A short lowercase name for messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Frontmatter => "frontmatter",
            NodeKind::Doctype(_) => "doctype",
            NodeKind::Element(el) if el.expression => "expression",
            NodeKind::Element(_) => "element",
            NodeKind::Text(_) => "text",
            NodeKind::Comment(_) => "comment",
        }
    }
}

/// Element payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    /// Tag name. Empty for expression blocks.
    pub name: SmolStr,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    /// Whether this is a `{...}` template expression rather than a tag.
    pub expression: bool,
    /// Offset of the closing tag (or closing brace), when one was written.
    pub end_loc: Option<ByteOffset>,
}

impl Element {
    /// Creates a tag element with no attributes.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a `{...}` expression block.
    pub fn expression() -> Self {
        Self {
            expression: true,
            ..Default::default()
        }
    }

    /// Appends an attribute.
    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Returns the first attribute with the given key.
    pub fn attribute(&self, key: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.key == key)
    }

    /// Returns true if an earlier pass marked this element as an implicit wrapper.
    pub fn is_implicit(&self) -> bool {
        self.attributes.iter().any(Attribute::is_implicit_marker)
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    loc: Option<ByteOffset>,
    parent: Option<NodeId>,
    /// Position among the parent's children.
    index: usize,
    children: Vec<NodeId>,
}

/// An arena-backed document tree rooted at a [`NodeKind::Document`].
#[derive(Clone)]
pub struct Tree {
    nodes: Vec<NodeData>,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// Creates a tree holding only the document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                loc: None,
                parent: None,
                index: 0,
                children: Vec::new(),
            }],
        }
    }

    /// Returns the number of nodes, root included.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds nothing but its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Returns a cursor at the document root.
    #[inline]
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::ROOT,
        }
    }

    /// Returns a cursor at `id`, or `None` if the id belongs to another tree.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Appends a new last child to `parent` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if `parent` is not a node of this tree.
    pub fn append(&mut self, parent: NodeId, kind: NodeKind, loc: Option<ByteOffset>) -> NodeId {
        debug_assert!(
            !matches!(kind, NodeKind::Document),
            "documents only appear at the root"
        );
        let id = NodeId(self.nodes.len() as u32);
        let index = self.nodes[parent.index()].children.len();
        self.nodes.push(NodeData {
            kind,
            loc,
            parent: Some(parent),
            index,
            children: Vec::new(),
        });
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Returns the element payload of `id` for in-place edits.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(id.index())?.kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_node(f: &mut fmt::Formatter<'_>, node: NodeRef<'_>, depth: usize) -> fmt::Result {
            write!(f, "{:indent$}{}", "", node.kind().name(), indent = depth * 2)?;
            match node.kind() {
                NodeKind::Element(el) if !el.expression => write!(f, " <{}>", el.name)?,
                NodeKind::Text(t) | NodeKind::Comment(t) | NodeKind::Doctype(t) => {
                    write!(f, " {t:?}")?
                }
                _ => {}
            }
            if let Some(loc) = node.loc() {
                write!(f, " @{}", u32::from(loc))?;
            }
            writeln!(f)?;
            for child in node.children() {
                write_node(f, child, depth + 1)?;
            }
            Ok(())
        }
        write_node(f, self.root(), 0)
    }
}

/// A borrowed cursor at one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind().name())
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    /// This node's id.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// This node's kind and payload.
    #[inline]
    pub fn kind(&self) -> &'a NodeKind {
        &self.tree.data(self.id).kind
    }

    /// The source offset where this node starts, if known.
    #[inline]
    pub fn loc(&self) -> Option<ByteOffset> {
        self.tree.data(self.id).loc
    }

    /// The element payload, if this is an element.
    pub fn as_element(&self) -> Option<&'a Element> {
        match self.kind() {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// The text payload, if this is a text node.
    pub fn as_text(&self) -> Option<&'a str> {
        match self.kind() {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Returns true if this is a text node.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self.kind(), NodeKind::Text(_))
    }

    /// Returns true if this is a comment node.
    #[inline]
    pub fn is_comment(&self) -> bool {
        matches!(self.kind(), NodeKind::Comment(_))
    }

    /// The parent node, `None` at the root.
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.data(self.id).parent.map(|id| self.at(id))
    }

    /// Children in document order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// The first child, if any.
    pub fn first_child(&self) -> Option<NodeRef<'a>> {
        self.tree.data(self.id).children.first().map(|&id| self.at(id))
    }

    /// Returns true if this node has at least one child.
    #[inline]
    pub fn has_children(&self) -> bool {
        !self.tree.data(self.id).children.is_empty()
    }

    /// The sibling immediately before this node.
    pub fn prev_sibling(&self) -> Option<NodeRef<'a>> {
        let data = self.tree.data(self.id);
        let index = data.index.checked_sub(1)?;
        let parent = self.tree.data(data.parent?);
        parent.children.get(index).map(|&id| self.at(id))
    }

    /// The sibling immediately after this node.
    pub fn next_sibling(&self) -> Option<NodeRef<'a>> {
        let data = self.tree.data(self.id);
        let parent = self.tree.data(data.parent?);
        parent.children.get(data.index + 1).map(|&id| self.at(id))
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeRef<'a>> {
        std::iter::successors(self.parent(), NodeRef::parent)
    }

    /// The nearest node, starting with this one and walking up, that satisfies `predicate`.
    pub fn closest(&self, mut predicate: impl FnMut(&NodeRef<'a>) -> bool) -> Option<NodeRef<'a>> {
        std::iter::successors(Some(*self), NodeRef::parent).find(|node| predicate(node))
    }

    fn at(&self, id: NodeId) -> NodeRef<'a> {
        NodeRef {
            tree: self.tree,
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use text_size::TextSize;

    fn sample() -> (Tree, NodeId, NodeId, NodeId) {
        // <ul><li>a</li>b<!--c--></ul>
        let mut tree = Tree::new();
        let ul = tree.append(NodeId::ROOT, NodeKind::Element(Element::new("ul")), Some(TextSize::from(0)));
        let li = tree.append(ul, NodeKind::Element(Element::new("li")), Some(TextSize::from(4)));
        tree.append(li, NodeKind::Text("a".into()), Some(TextSize::from(8)));
        let b = tree.append(ul, NodeKind::Text("b".into()), Some(TextSize::from(14)));
        let c = tree.append(ul, NodeKind::Comment("c".into()), Some(TextSize::from(15)));
        (tree, li, b, c)
    }

    #[test]
    fn test_siblings() {
        let (tree, li, b, c) = sample();
        let li = tree.get(li).unwrap();
        let b = tree.get(b).unwrap();
        let c = tree.get(c).unwrap();

        assert_eq!(li.prev_sibling(), None);
        assert_eq!(li.next_sibling(), Some(b));
        assert_eq!(b.prev_sibling(), Some(li));
        assert_eq!(b.next_sibling(), Some(c));
        assert_eq!(c.next_sibling(), None);
        assert!(tree.root().prev_sibling().is_none());
    }

    #[test]
    fn test_parent_and_ancestors() {
        let (tree, li, _, _) = sample();
        let text = tree.get(li).unwrap().first_child().unwrap();
        assert_eq!(text.as_text(), Some("a"));

        let names: Vec<_> = text.ancestors().map(|n| n.kind().name()).collect();
        assert_eq!(names, vec!["element", "element", "document"]);
        assert_eq!(tree.root().parent(), None);
    }

    fn is_tag(name: &'static str) -> impl Fn(&NodeRef<'_>) -> bool {
        move |n| n.as_element().is_some_and(|el| el.name == name)
    }

    #[test]
    fn test_closest_includes_self() {
        let (tree, li, _, _) = sample();
        let li = tree.get(li).unwrap();

        assert_eq!(li.closest(is_tag("li")), Some(li));
        assert_eq!(li.closest(is_tag("ul")), li.parent());
        let text = li.first_child().unwrap();
        assert_eq!(text.closest(is_tag("li")), Some(li));
        assert_eq!(text.closest(is_tag("script")), None);
    }

    #[test]
    fn test_children_order() {
        let (tree, _, _, _) = sample();
        let ul = tree.root().first_child().unwrap();
        let kinds: Vec<_> = ul.children().map(|n| n.kind().name()).collect();
        assert_eq!(kinds, vec!["element", "text", "comment"]);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn test_debug_output() {
        let (tree, _, _, _) = sample();
        let dump = format!("{tree:?}");
        assert!(dump.starts_with("document\n  element <ul> @0\n    element <li> @4\n"));
        assert!(dump.contains("comment \"c\" @15"));
    }
}
