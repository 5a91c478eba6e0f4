//! Markdown source extraction from the page body.

use crate::dom::Element;

/// Get the raw Markdown text of a page.
///
/// Browsers put plain-text responses in a `<pre>` directly under `<body>`;
/// the first such element wins. Without one, the text of the whole body is
/// used. The result may be empty.
#[must_use]
pub fn extract_markdown(body: &Element) -> String {
    body.child_elements()
        .find(|element| element.name() == "pre")
        .map_or_else(|| body.text_content(), Element::text_content)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dom::Node;

    #[test]
    fn test_direct_pre_child() {
        let body =
            Element::new("body").with_child(Element::new("pre").with_child(Node::text("# Hi")));
        assert_eq!(extract_markdown(&body), "# Hi");
    }

    #[test]
    fn test_body_text_without_pre() {
        let body = Element::new("body").with_child(Node::text("plain text"));
        assert_eq!(extract_markdown(&body), "plain text");
    }

    #[test]
    fn test_first_pre_wins_and_siblings_ignored() {
        let body = Element::new("body")
            .with_child(Element::new("div").with_child(Node::text("toolbar")))
            .with_child(Element::new("pre").with_child(Node::text("first")))
            .with_child(Element::new("pre").with_child(Node::text("second")));
        assert_eq!(extract_markdown(&body), "first");
    }

    #[test]
    fn test_nested_pre_is_not_direct_child() {
        let body = Element::new("body").with_child(
            Element::new("div")
                .with_child(Node::text("intro "))
                .with_child(Element::new("pre").with_child(Node::text("code"))),
        );
        assert_eq!(extract_markdown(&body), "intro code");
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(extract_markdown(&Element::new("body")), "");
    }
}
