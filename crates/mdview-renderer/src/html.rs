//! GitHub-style markup for code blocks, alerts, images and task markers.
//!
//! Matches what GitHub emits so that a `markdown-body` stylesheet applies
//! unchanged.

use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

use crate::state::escape_html;

/// GitHub alert kind (`> [!NOTE]`, `> [!WARNING]`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// Lowercase name used in CSS classes.
    fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// `<pre><code class="language-x">` for fenced code, plain `<pre><code>` otherwise.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    match lang {
        Some(lang) => {
            let _ = write!(
                out,
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                escape_html(lang),
                escape_html(content)
            );
        }
        None => {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        }
    }
}

pub(crate) fn alert_start(kind: AlertKind, out: &mut String) {
    let _ = write!(
        out,
        r#"<div class="markdown-alert markdown-alert-{}"><p class="markdown-alert-title">{}</p>"#,
        kind.as_str(),
        kind.title()
    );
}

pub(crate) fn alert_end(out: &mut String) {
    out.push_str("</div>");
}

/// `<img>` with `alt`, and `title` when non-empty.
pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let _ = write!(
        out,
        r#"<img src="{}" alt="{}""#,
        escape_html(src),
        escape_html(alt)
    );
    if !title.is_empty() {
        let _ = write!(out, r#" title="{}""#, escape_html(title));
    }
    out.push('>');
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_block_with_language() {
        let mut out = String::new();
        code_block(Some("rust"), "fn main() {}\n", &mut out);
        assert_eq!(
            out,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>"
        );
    }

    #[test]
    fn test_code_block_escapes_content() {
        let mut out = String::new();
        code_block(None, "<b>&</b>", &mut out);
        assert_eq!(out, "<pre><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>");
    }

    #[test]
    fn test_image_without_title() {
        let mut out = String::new();
        image("logo.png", "Logo", "", &mut out);
        assert_eq!(out, r#"<img src="logo.png" alt="Logo">"#);
    }

    #[test]
    fn test_image_with_title() {
        let mut out = String::new();
        image("logo.png", "Logo", "Project \"logo\"", &mut out);
        assert_eq!(
            out,
            r#"<img src="logo.png" alt="Logo" title="Project &quot;logo&quot;">"#
        );
    }

    #[test]
    fn test_alert_markup() {
        let mut out = String::new();
        alert_start(AlertKind::Warning, &mut out);
        out.push_str("<p>careful</p>");
        alert_end(&mut out);
        assert_eq!(
            out,
            concat!(
                r#"<div class="markdown-alert markdown-alert-warning">"#,
                r#"<p class="markdown-alert-title">Warning</p>"#,
                "<p>careful</p></div>"
            )
        );
    }
}
