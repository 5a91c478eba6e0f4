//! Owned DOM tree for page snapshots.
//!
//! Only the parts of the DOM the renderer touches are modelled: elements with
//! attributes, text and comments. Element names are lowercase HTML local names.

use std::fmt::Write;

use crate::parse;

/// Elements that never have children or an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are serialized without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes"];

/// Elements whose first newline is dropped by the parser.
const NEWLINE_ELEMENTS: &[&str] = &["pre", "textarea", "listing"];

/// A DOM node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Shorthand for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenated text of this node and its descendants (DOM `textContent`).
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Comment(_) => {}
        }
    }

    fn write_html(&self, out: &mut String, raw_text: bool) {
        match self {
            Self::Element(element) => element.write_outer_html(out),
            Self::Text(text) if raw_text => out.push_str(text),
            Self::Text(text) => escape_text(text, out),
            Self::Comment(text) => {
                let _ = write!(out, "<!--{text}-->");
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A DOM element.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element. The name is lowercased.
    pub fn new(name: impl Into<String>) -> Self {
        let mut name = name.into();
        name.make_ascii_lowercase();
        Self {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`set_attr`](Self::set_attr).
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder form of [`append_child`](Self::append_child).
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Class names from the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_ascii_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Add a class name (DOM `classList.add`); existing names are kept once.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let mut value = self.classes().collect::<Vec<_>>().join(" ");
        if !value.is_empty() {
            value.push(' ');
        }
        value.push_str(class);
        self.set_attr("class", value);
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Direct child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of all descendants (DOM `textContent`).
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Replace the children with nodes parsed from an HTML fragment
    /// (DOM `innerHTML` assignment).
    pub fn set_inner_html(&mut self, html: &str) {
        self.children = parse::parse_fragment(html);
    }

    /// Serialize the children to HTML.
    #[must_use]
    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        self.write_inner_html(&mut out);
        out
    }

    /// Serialize the element and its children to HTML.
    #[must_use]
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_outer_html(&mut out);
        out
    }

    fn write_outer_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"");
            escape_attr(value, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.name.as_str()) {
            return;
        }
        self.write_inner_html(out);
        let _ = write!(out, "</{}>", self.name);
    }

    fn write_inner_html(&self, out: &mut String) {
        if NEWLINE_ELEMENTS.contains(&self.name.as_str())
            && let Some(Node::Text(text)) = self.children.first()
            && text.starts_with('\n')
        {
            out.push('\n');
        }
        let raw_text = RAW_TEXT_ELEMENTS.contains(&self.name.as_str());
        for child in &self.children {
            child.write_html(out, raw_text);
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
