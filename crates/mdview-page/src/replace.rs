//! Body replacement, split into a pure plan and an apply step.

use crate::document::Document;
use crate::dom::{Element, Node};

/// CSS marker classes for external stylesheets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    /// Class of the container holding the rendered HTML.
    pub container_class: String,
    /// Class added to `<body>` once rendering happened.
    pub body_class: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            container_class: "markdown-body".to_owned(),
            body_class: "markdown-rendered".to_owned(),
        }
    }
}

/// A planned body replacement. Nothing is mutated until [`apply`](Self::apply).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replacement {
    container: Element,
    body_class: String,
    title: Option<String>,
}

impl Replacement {
    /// The container that will become the only child of `<body>`.
    #[must_use]
    pub fn container(&self) -> &Element {
        &self.container
    }

    #[must_use]
    pub fn body_class(&self) -> &str {
        &self.body_class
    }

    /// Title to give a document that has none.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Set the document title used when the page has no `<title>`.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title.filter(|t| !t.is_empty());
        self
    }

    /// Replace the body content with the container and mark the body.
    ///
    /// Destructive: the previous body children are dropped.
    pub fn apply(self, document: &mut Document) {
        if let Some(title) = self.title {
            let head = document.head_mut();
            if !head.child_elements().any(|e| e.name() == "title") {
                head.append_child(Element::new("title").with_child(Node::text(title)));
            }
        }

        let body = document.body_mut();
        body.clear_children();
        body.append_child(self.container);
        body.add_class(&self.body_class);
    }
}

/// Build the replacement for rendered HTML.
///
/// The container is a `div` carrying the container marker class, with the
/// HTML parsed as its children.
#[must_use]
pub fn plan_replacement(html: &str, markers: &Markers) -> Replacement {
    let mut container = Element::new("div").with_attr("class", markers.container_class.as_str());
    container.set_inner_html(html);

    Replacement {
        container,
        body_class: markers.body_class.clone(),
        title: None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn document(body_html: &str) -> Document {
        Document::parse_html(
            "https://example.com/readme.md",
            "text/plain",
            &format!("<html><head></head><body class=\"theme\">{body_html}</body></html>"),
        )
        .unwrap()
    }

    #[test]
    fn test_plan_is_pure() {
        let doc = document("<pre># Hi</pre>");
        let before = doc.to_html();
        let plan = plan_replacement("<h1 id=\"hi\">Hi</h1>", &Markers::default());
        assert_eq!(doc.to_html(), before);
        assert_eq!(
            plan.container().outer_html(),
            r#"<div class="markdown-body"><h1 id="hi">Hi</h1></div>"#
        );
        assert_eq!(plan.body_class(), "markdown-rendered");
    }

    #[test]
    fn test_apply_replaces_body() {
        let mut doc = document("<pre># Hi</pre><div>extra</div>");
        plan_replacement("<p>rendered</p>", &Markers::default()).apply(&mut doc);

        let body = doc.body();
        assert_eq!(body.children().len(), 1);
        assert_eq!(
            body.outer_html(),
            r#"<body class="theme markdown-rendered"><div class="markdown-body"><p>rendered</p></div></body>"#
        );
    }

    #[test]
    fn test_custom_markers() {
        let markers = Markers {
            container_class: "md".to_owned(),
            body_class: "md-done".to_owned(),
        };
        let mut doc = document("<pre>x</pre>");
        plan_replacement("<p>x</p>", &markers).apply(&mut doc);
        assert!(doc.body().has_class("md-done"));
        assert!(doc.body().child_elements().all(|e| e.has_class("md")));
    }

    #[test]
    fn test_title_added_only_when_missing() {
        let mut doc = document("<pre># Hi</pre>");
        plan_replacement("<h1>Hi</h1>", &Markers::default())
            .with_title(Some("Hi".to_owned()))
            .apply(&mut doc);
        assert_eq!(doc.head().outer_html(), "<head><title>Hi</title></head>");

        let mut doc = Document::parse_html(
            "https://example.com/readme.md",
            "text/plain",
            "<title>readme.md</title><pre># Hi</pre>",
        )
        .unwrap();
        plan_replacement("<h1>Hi</h1>", &Markers::default())
            .with_title(Some("Hi".to_owned()))
            .apply(&mut doc);
        assert_eq!(doc.head().text_content(), "readme.md");
    }
}
