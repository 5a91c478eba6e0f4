//! Page snapshot: location, content type, ready state and DOM.

use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::dom::{Element, Node};
use crate::error::PageError;
use crate::parse;

/// Document URL (`document.location`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    href: String,
    pathname: String,
}

impl Location {
    /// Parse an absolute URL.
    pub fn parse(href: &str) -> Result<Self, PageError> {
        let url = Url::parse(href).map_err(|source| PageError::InvalidUrl {
            url: href.to_owned(),
            source,
        })?;
        Ok(Self::from(url))
    }

    /// The full serialized URL, including query and fragment.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The path component, without query or fragment.
    #[must_use]
    pub fn pathname(&self) -> &str {
        &self.pathname
    }
}

impl From<Url> for Location {
    fn from(url: Url) -> Self {
        Self {
            pathname: url.path().to_owned(),
            href: url.into(),
        }
    }
}

impl FromStr for Location {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// Loading progress (`document.readyState`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReadyState {
    /// Still parsing; the DOM is incomplete.
    Loading,
    /// Parsed; subresources may still be loading.
    Interactive,
    #[default]
    Complete,
}

/// A page snapshot the renderer reads and, on success, rewrites.
#[derive(Clone, Debug)]
pub struct Document {
    location: Location,
    content_type: String,
    ready_state: ReadyState,
    head: Element,
    body: Element,
}

impl Document {
    /// Create a complete document with an empty head.
    ///
    /// The content type is reduced to its MIME essence (`text/plain;
    /// charset=utf-8` becomes `text/plain`), as `document.contentType` reports it.
    pub fn new(location: Location, content_type: &str, body: Element) -> Self {
        Self {
            location,
            content_type: mime_essence(content_type),
            ready_state: ReadyState::Complete,
            head: Element::new("head"),
            body,
        }
    }

    /// Parse a saved HTML page.
    pub fn parse_html(url: &str, content_type: &str, html: &str) -> Result<Self, PageError> {
        let location = Location::parse(url)?;
        let parsed = parse::parse_html(html);
        let mut document = Self::new(location, content_type, parsed.body);
        document.head = parsed.head;
        Ok(document)
    }

    /// Build the document a browser shows for a plain-text response:
    /// the whole text inside a single `<pre>` in the body.
    pub fn from_plain_text(url: &str, content_type: &str, text: &str) -> Result<Self, PageError> {
        let location = Location::parse(url)?;
        let pre = Element::new("pre").with_child(Node::text(text));
        Ok(Self::new(
            location,
            content_type,
            Element::new("body").with_child(pre),
        ))
    }

    #[must_use]
    pub fn with_ready_state(mut self, ready_state: ReadyState) -> Self {
        self.ready_state = ready_state;
        self
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[must_use]
    pub fn ready_state(&self) -> ReadyState {
        self.ready_state
    }

    pub fn set_ready_state(&mut self, ready_state: ReadyState) {
        self.ready_state = ready_state;
    }

    #[must_use]
    pub fn head(&self) -> &Element {
        &self.head
    }

    pub fn head_mut(&mut self) -> &mut Element {
        &mut self.head
    }

    #[must_use]
    pub fn body(&self) -> &Element {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Element {
        &mut self.body
    }

    /// Serialize the document as HTML5.
    ///
    /// Parsing the result with [`parse_html`](Self::parse_html) gives back the
    /// same head and body. Nothing follows `</html>`, since trailing text
    /// would be parsed into the body.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>{}{}</html>",
            self.head.outer_html(),
            self.body.outer_html()
        )
    }
}

/// Lowercased MIME type without parameters.
///
/// ```
/// assert_eq!(
///     mdview_page::mime_essence("Text/Plain; charset=utf-8"),
///     "text/plain"
/// );
/// ```
#[must_use]
pub fn mime_essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}
