//! Element attributes.

use smol_str::SmolStr;
use source_map::ByteOffset;
use text_size::TextSize;

/// Prefix that marks an attribute key as a template directive (`@click`).
pub const DIRECTIVE_MARKER: char = '@';

/// Key of the synthetic attribute that earlier passes put on implicit wrapper elements.
pub const IMPLICIT_NODE_MARKER: &str = "\u{0}implicit";

/// The syntactic form an attribute was written in, with its raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// `key="value"`
    Quoted(String),
    /// `key`
    Empty,
    /// `key={expr}`
    Expression(String),
    /// `{...expr}`
    Spread(String),
    /// `{key}`
    Shorthand,
    /// ``key=`body` ``
    TemplateLiteral(String),
}

/// An attribute on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name. Empty for most spreads.
    pub key: SmolStr,
    /// The value and its syntactic form.
    pub value: AttributeValue,
    /// Namespace prefix (`xlink` in `xlink:href`), if the parser split one off.
    pub namespace: Option<SmolStr>,
    /// Source offset of the key.
    pub key_loc: ByteOffset,
    /// Source offset of the value.
    pub value_loc: ByteOffset,
}

impl Attribute {
    fn new(key: impl Into<SmolStr>, value: AttributeValue, key_loc: u32, value_loc: u32) -> Self {
        Self {
            key: key.into(),
            value,
            namespace: None,
            key_loc: TextSize::from(key_loc),
            value_loc: TextSize::from(value_loc),
        }
    }

    /// `key="value"`
    pub fn quoted(key: impl Into<SmolStr>, value: impl Into<String>, key_loc: u32, value_loc: u32) -> Self {
        Self::new(key, AttributeValue::Quoted(value.into()), key_loc, value_loc)
    }

    /// `key`
    pub fn empty(key: impl Into<SmolStr>, key_loc: u32) -> Self {
        Self::new(key, AttributeValue::Empty, key_loc, key_loc)
    }

    /// `key={expr}`
    pub fn expression(key: impl Into<SmolStr>, expr: impl Into<String>, key_loc: u32, value_loc: u32) -> Self {
        Self::new(key, AttributeValue::Expression(expr.into()), key_loc, value_loc)
    }

    /// `{...expr}`
    pub fn spread(expr: impl Into<String>, key_loc: u32, value_loc: u32) -> Self {
        Self::new("", AttributeValue::Spread(expr.into()), key_loc, value_loc)
    }

    /// `{key}`
    pub fn shorthand(key: impl Into<SmolStr>, key_loc: u32) -> Self {
        Self::new(key, AttributeValue::Shorthand, key_loc, key_loc)
    }

    /// ``key=`body` ``
    pub fn template_literal(
        key: impl Into<SmolStr>,
        body: impl Into<String>,
        key_loc: u32,
        value_loc: u32,
    ) -> Self {
        Self::new(key, AttributeValue::TemplateLiteral(body.into()), key_loc, value_loc)
    }

    /// The marker attribute identifying an implicit wrapper element.
    pub fn implicit_marker() -> Self {
        Self::new(IMPLICIT_NODE_MARKER, AttributeValue::Empty, 0, 0)
    }

    /// Sets the namespace prefix.
    pub fn with_namespace(mut self, namespace: impl Into<SmolStr>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Returns true if the key starts with [`DIRECTIVE_MARKER`].
    #[inline]
    pub fn is_directive(&self) -> bool {
        self.key.starts_with(DIRECTIVE_MARKER)
    }

    /// Returns true if this is the implicit-node marker.
    #[inline]
    pub fn is_implicit_marker(&self) -> bool {
        self.key == IMPLICIT_NODE_MARKER
    }

    /// Returns the raw value text; empty for `Empty` and `Shorthand`.
    pub fn raw_value(&self) -> &str {
        match &self.value {
            AttributeValue::Quoted(v)
            | AttributeValue::Expression(v)
            | AttributeValue::Spread(v)
            | AttributeValue::TemplateLiteral(v) => v,
            AttributeValue::Empty | AttributeValue::Shorthand => "",
        }
    }
}
