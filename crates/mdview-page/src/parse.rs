//! HTML parsing into the owned DOM using `html5ever`.

use html5ever::tendril::TendrilSink;
use html5ever::{ParseOpts, QualName, local_name, ns, parse_document};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::dom::{Element, Node};

/// Head and body of a parsed document.
pub(crate) struct ParsedDocument {
    pub head: Element,
    pub body: Element,
}

/// Parse a full HTML document. The parser never fails; malformed input is
/// repaired the way a browser would.
pub(crate) fn parse_html(html: &str) -> ParsedDocument {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);

    let mut head = None;
    let mut body = None;
    if let Some(root) = find_child_element(&dom.document, "html") {
        for child in root.children.borrow().iter() {
            match element_name(child).as_deref() {
                Some("head") if head.is_none() => head = Some(convert_element(child)),
                Some("body") if body.is_none() => body = Some(convert_element(child)),
                _ => {}
            }
        }
    }

    ParsedDocument {
        head: head.unwrap_or_else(|| Element::new("head")),
        body: body.unwrap_or_else(|| Element::new("body")),
    }
}

/// Parse an HTML fragment into nodes, as assigning `innerHTML` on a
/// `div` would.
pub(crate) fn parse_fragment(html: &str) -> Vec<Node> {
    let context = QualName::new(None, ns!(html), local_name!("div"));
    let dom = html5ever::parse_fragment(
        RcDom::default(),
        ParseOpts::default(),
        context,
        Vec::new(),
        false,
    )
    .one(html);

    // The parser puts the fragment under a synthetic <html> root
    find_child_element(&dom.document, "html")
        .map(|root| convert_children(&root))
        .unwrap_or_default()
}

fn element_name(handle: &Handle) -> Option<String> {
    match &handle.data {
        NodeData::Element { name, .. } => Some(name.local.to_string()),
        _ => None,
    }
}

fn find_child_element(parent: &Handle, name: &str) -> Option<Handle> {
    parent
        .children
        .borrow()
        .iter()
        .find(|child| element_name(child).as_deref() == Some(name))
        .cloned()
}

fn convert_element(handle: &Handle) -> Element {
    let NodeData::Element {
        name,
        attrs,
        template_contents,
        ..
    } = &handle.data
    else {
        return Element::default();
    };

    let mut element = Element::new(name.local.to_string());
    for attr in attrs.borrow().iter() {
        element.set_attr(attr.name.local.to_string(), attr.value.to_string());
    }

    // <template> keeps its content in a separate fragment
    let children = match template_contents.borrow().as_ref() {
        Some(contents) => convert_children(contents),
        None => convert_children(handle),
    };
    for child in children {
        element.append_child(child);
    }
    element
}

fn convert_children(handle: &Handle) -> Vec<Node> {
    handle
        .children
        .borrow()
        .iter()
        .filter_map(convert_node)
        .collect()
}

fn convert_node(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element { .. } => Some(Node::Element(convert_element(handle))),
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        _ => None,
    }
}
