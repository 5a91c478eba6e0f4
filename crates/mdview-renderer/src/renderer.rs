//! Markdown renderer walking pulldown-cmark events.

use std::fmt::Write;

use pulldown_cmark::{
    CodeBlockKind, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream,
};

use crate::autolink::autolink;
use crate::html::{self, AlertKind};
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};

/// Result of rendering markdown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Text of the first H1 heading, if any.
    pub title: Option<String>,
}

/// Markdown renderer producing GitHub-style HTML.
///
/// Raw HTML in the source is copied to the output verbatim.
pub struct MarkdownRenderer {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    /// Stack of alert kinds for nested blockquotes (regular blockquote uses None).
    alert_stack: Vec<Option<AlertKind>>,
    /// Open links; bare URLs inside them are not autolinked.
    link_depth: usize,
    gfm: bool,
    breaks: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with GFM and header ids enabled and CommonMark
    /// soft-break handling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::new(true),
            pending_image: None,
            alert_stack: Vec::new(),
            link_depth: 0,
            gfm: true,
            breaks: false,
        }
    }

    /// Enable or disable GitHub Flavored Markdown extensions.
    ///
    /// When enabled, the parser supports tables, strikethrough (`~~text~~`),
    /// task lists (`- [ ] item`) and alerts (`> [!NOTE]`), and bare URLs,
    /// `www.` links and email addresses become links.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Render single newlines inside a paragraph as `<br>`.
    #[must_use]
    pub fn with_breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Enable or disable `id` attributes on headings.
    #[must_use]
    pub fn with_header_ids(mut self, enabled: bool) -> Self {
        self.heading = HeadingState::new(enabled);
        self
    }

    /// Parser options for the current GFM setting.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Parse and render markdown text with the configured options.
    pub fn render_markdown(&mut self, markdown: &str) -> RenderResult {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(TextMergeStream::new(parser))
    }

    /// Render markdown events and return the result.
    pub fn render<'a, I>(&mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'a>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            html: std::mem::take(&mut self.output),
            title: self.heading.take_title(),
        }
    }

    /// Push content to the heading buffer when inside a heading, else to output.
    fn push_inline(&mut self, content: &str) {
        if self.heading.is_active() {
            self.heading.push_html(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) => self.output.push_str(&html),
            Event::InlineHtml(html) => {
                if !self.image.is_active() {
                    self.push_inline(&html);
                }
            }
            Event::SoftBreak => self.soft_break(),
            Event::HardBreak => {
                if self.image.is_active() {
                    self.image.push_str(" ");
                } else {
                    self.push_inline("<br>\n");
                }
            }
            Event::Rule => self.output.push_str("<hr>"),
            Event::TaskListMarker(checked) => html::task_list_marker(checked, &mut self.output),
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in parser options
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        if self.image.is_active() {
            // Inside image alt text only plain text is collected
            if let Tag::Image { .. } = tag {
                self.image.start();
            }
            return;
        }

        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => {
                // Opening tag is written in end_tag once the id is known
                self.heading.start_heading(heading_level_to_num(level));
            }
            Tag::BlockQuote(kind) => {
                if let Some(kind) = kind {
                    let alert = AlertKind::from(kind);
                    self.alert_stack.push(Some(alert));
                    html::alert_start(alert, &mut self.output);
                } else {
                    self.alert_stack.push(None);
                    self.output.push_str("<blockquote>");
                }
            }
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_owned),
                    CodeBlockKind::Indented => None,
                };
                self.code.start(lang);
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>"),
                Some(n) => {
                    let _ = write!(self.output, r#"<ol start="{n}">"#);
                }
                None => self.output.push_str("<ul>"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_attr();
                let tag = if self.table.is_in_head() { "th" } else { "td" };
                let _ = write!(self.output, "<{tag}{align}>");
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let scheme = if link_type == LinkType::Email { "mailto:" } else { "" };
                let mut link = format!(r#"<a href="{scheme}{}""#, escape_html(&dest_url));
                if !title.is_empty() {
                    let _ = write!(link, r#" title="{}""#, escape_html(&title));
                }
                link.push('>');
                self.link_depth += 1;
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text is collected until the matching end tag
                self.image.start();
                self.pending_image = Some((dest_url.into_string(), title.into_string()));
            }
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::HtmlBlock | Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        if self.image.is_active() {
            if tag == TagEnd::Image {
                self.end_image();
            }
            return;
        }

        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete_heading() {
                    let level = heading.level;
                    let html = heading.html.trim();
                    let _ = match heading.id {
                        Some(id) => write!(self.output, r#"<h{level} id="{id}">{html}</h{level}>"#),
                        None => write!(self.output, "<h{level}>{html}</h{level}>"),
                    };
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => html::alert_end(&mut self.output),
                _ => self.output.push_str("</blockquote>"),
            },
            TagEnd::CodeBlock => {
                let (lang, content) = self.code.end();
                html::code_block(lang.as_deref(), &content, &mut self.output);
            }
            TagEnd::List(ordered) => {
                self.output.push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => self.output.push_str("</li>"),
            TagEnd::Table => self.output.push_str("</tbody></table>"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str(if self.table.is_in_head() {
                    "</th>"
                } else {
                    "</td>"
                });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => {
                self.link_depth = self.link_depth.saturating_sub(1);
                self.push_inline("</a>");
            }
            TagEnd::Image => self.end_image(),
            TagEnd::DefinitionList => self.output.push_str("</dl>"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::HtmlBlock | TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
        }
    }

    fn end_image(&mut self) {
        let Some(alt) = self.image.end() else {
            return;
        };
        if let Some((src, title)) = self.pending_image.take() {
            let mut img = String::new();
            html::image(&src, &alt, &title, &mut img);
            self.push_inline(&img);
        }
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }
        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        if self.heading.is_active() {
            self.heading.push_text(text);
        }
        let html = if self.gfm && self.link_depth == 0 {
            autolink(text)
        } else {
            escape_html(text)
        };
        self.push_inline(&html);
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
            return;
        }
        if self.heading.is_active() {
            self.heading.push_text("\n");
        }
        if self.breaks {
            self.push_inline("<br>\n");
        } else {
            self.push_inline("\n");
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
