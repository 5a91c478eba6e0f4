//! Event-tracking state used while rendering.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Code block being collected.
#[derive(Default)]
pub(crate) struct CodeBlockState {
    active: bool,
    language: Option<String>,
    buffer: String,
}

impl CodeBlockState {
    pub(crate) fn start(&mut self, language: Option<String>) {
        self.active = true;
        self.language = language;
        self.buffer.clear();
    }

    /// End the current code block and return (language, content).
    pub(crate) fn end(&mut self) -> (Option<String>, String) {
        self.active = false;
        (self.language.take(), std::mem::take(&mut self.buffer))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Table position and column alignments.
#[derive(Default)]
pub(crate) struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub(crate) fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub(crate) fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub(crate) fn end_head(&mut self) {
        self.in_head = false;
    }

    pub(crate) fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub(crate) fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub(crate) fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Alignment attribute for the current cell (empty for default alignment).
    pub(crate) fn current_alignment_attr(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" align="left""#,
            Some(Alignment::Center) => r#" align="center""#,
            Some(Alignment::Right) => r#" align="right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Alt text capture for an image.
#[derive(Default)]
pub(crate) struct ImageState {
    depth: usize,
    alt_text: String,
}

impl ImageState {
    pub(crate) fn start(&mut self) {
        if self.depth == 0 {
            self.alt_text.clear();
        }
        self.depth += 1;
    }

    /// Leave an image; returns the alt text once the outermost image closes.
    pub(crate) fn end(&mut self) -> Option<String> {
        self.depth = self.depth.saturating_sub(1);
        (self.depth == 0).then(|| std::mem::take(&mut self.alt_text))
    }

    pub(crate) fn is_active(&self) -> bool {
        self.depth > 0
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// A heading that has been fully collected.
pub(crate) struct CompletedHeading {
    pub level: u8,
    pub id: Option<String>,
    pub html: String,
}

/// Heading capture, id generation and title extraction.
pub(crate) struct HeadingState {
    generate_ids: bool,
    title: Option<String>,
    current_level: Option<u8>,
    /// Plain text of the current heading, used for slugs and the title.
    text: String,
    /// HTML of the current heading, with inline formatting.
    html: String,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub(crate) fn new(generate_ids: bool) -> Self {
        Self {
            generate_ids,
            title: None,
            current_level: None,
            text: String::new(),
            html: String::new(),
            id_counts: HashMap::new(),
        }
    }

    pub(crate) fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub(crate) fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Finish the current heading. The first H1 becomes the document title.
    pub(crate) fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);
        let title = text.trim().to_owned();

        let id = self.generate_ids.then(|| self.generate_id(&title));

        if level == 1 && self.title.is_none() {
            self.title = Some(title);
        }

        Some(CompletedHeading { level, id, html })
    }

    /// Generate a unique ID for a heading.
    fn generate_id(&mut self, text: &str) -> String {
        let base_id = slugify(text);
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub(crate) fn push_html(&mut self, html: &str) {
        self.html.push_str(html);
    }

    pub(crate) fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }
}

/// Convert heading text to an anchor id, the way GitHub does.
///
/// Lowercases, keeps alphanumerics, `-` and `_`, turns every whitespace
/// character into `-` and drops everything else. Runs are not merged, so
/// in-page links written against GitHub anchors resolve.
///
/// ```
/// use mdview_renderer::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("my_func"), "my_func");
/// assert_eq!(slugify("a - b"), "a---b");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
        } else if c == '-' || c == '_' || c.is_whitespace() {
            result.push(if c == '_' { '_' } else { '-' });
        }
    }
    result
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Title"), "title");
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("What's New?"), "whats-new");
        assert_eq!(slugify("  Spaces  "), "spaces");
        assert_eq!(slugify("snake_case and-kebab"), "snake_case-and-kebab");
        assert_eq!(slugify("a - b"), "a---b");
        assert_eq!(slugify("line1\nline2"), "line1-line2");
        assert_eq!(slugify("v1.2 (beta)"), "v12-beta");
        assert_eq!(slugify("Überblick"), "überblick");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_heading_ids_deduplicated() {
        let mut state = HeadingState::new(true);
        let mut ids = Vec::new();
        for _ in 0..3 {
            state.start_heading(2);
            state.push_text("Usage");
            ids.push(state.complete_heading().unwrap().id.unwrap());
        }
        assert_eq!(ids, ["usage", "usage-1", "usage-2"]);
    }

    #[test]
    fn test_heading_without_ids() {
        let mut state = HeadingState::new(false);
        state.start_heading(1);
        state.push_text("Title");
        let heading = state.complete_heading().unwrap();
        assert_eq!(heading.level, 1);
        assert!(heading.id.is_none());
        assert_eq!(state.take_title(), Some("Title".to_owned()));
    }

    #[test]
    fn test_first_h1_is_title() {
        let mut state = HeadingState::new(true);
        state.start_heading(2);
        state.push_text("Intro");
        state.complete_heading();
        state.start_heading(1);
        state.push_text("Main");
        state.complete_heading();
        state.start_heading(1);
        state.push_text("Other");
        state.complete_heading();

        assert_eq!(state.take_title(), Some("Main".to_owned()));
    }

    #[test]
    fn test_nested_image_alt_text() {
        let mut state = ImageState::default();
        state.start();
        state.push_str("outer ");
        state.start();
        state.push_str("inner");
        assert_eq!(state.end(), None);
        assert!(state.is_active());
        assert_eq!(state.end(), Some("outer inner".to_owned()));
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_alignment() {
        let mut state = TableState::default();
        state.start(vec![Alignment::None, Alignment::Right]);
        state.start_head();
        assert_eq!(state.current_alignment_attr(), "");
        state.next_cell();
        assert_eq!(state.current_alignment_attr(), r#" align="right""#);
        state.end_head();
        assert!(!state.is_in_head());
    }
}
