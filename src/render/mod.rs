//! HTML output.
//!
//! Documents are assembled as a small [`Node`] tree and serialised in one
//! pass; text and attribute values are escaped on the way out, [`Node::Raw`]
//! is written verbatim (stylesheet, loader script, sideband JSON).
//!
//! ```rust
//! use chatpage::render::{Element, Node};
//!
//! let node: Node = Element::new("div")
//!     .class("bubble")
//!     .child(Element::new("p").text("a < b"))
//!     .into();
//!
//! assert_eq!(node.to_html(), r#"<div class="bubble"><p>a &lt; b</p></div>"#);
//! ```

pub mod document;

pub use document::{Document, DocumentRenderer, base_name, document_name, sanitize_file_name};

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["img", "meta", "br"];

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Escaped text
    Text(String),
    /// Markup written verbatim
    Raw(String),
}

impl Node {
    /// Serialises the node.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Appends the serialised node to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_html(out),
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Raw(raw) => out.push_str(raw),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with ordered attributes.
///
/// Attributes with a `None` value are written bare (`controls`, `download`).
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, Option<String>)>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, Some(value.into())));
        self
    }

    /// Adds a valueless attribute.
    #[must_use]
    pub fn flag(mut self, name: &'static str) -> Self {
        self.attributes.push((name, None));
        self
    }

    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(nodes);
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn raw(self, raw: impl Into<String>) -> Self {
        self.child(Node::Raw(raw.into()))
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the value of the first attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            if let Some(value) = value {
                out.push_str("=\"");
                out.push_str(&escape_html(value));
                out.push('"');
            }
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(self.tag);
        out.push('>');
    }
}

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
