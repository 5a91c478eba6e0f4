//! GFM extended autolinks for bare URLs and email addresses in text.

use std::fmt::Write;

use linkify::{LinkFinder, LinkKind};

use crate::state::escape_html;

/// Escape `text` for HTML, wrapping bare links in `<a>`.
///
/// Links with a scheme (`https://…`) are kept as written, `www.` links get
/// `http://` and email addresses get `mailto:`. Other scheme-less domains
/// (`notes.md`) stay plain text.
pub(crate) fn autolink(text: &str) -> String {
    let mut finder = LinkFinder::new();
    finder.url_must_have_scheme(false);

    let mut out = String::with_capacity(text.len());
    for span in finder.spans(text) {
        let s = span.as_str();
        match span.kind().and_then(|kind| link_href(kind, s)) {
            Some(href) => {
                let _ = write!(
                    out,
                    r#"<a href="{}">{}</a>"#,
                    escape_html(&href),
                    escape_html(s)
                );
            }
            None => out.push_str(&escape_html(s)),
        }
    }
    out
}

fn link_href(kind: &LinkKind, link: &str) -> Option<String> {
    match kind {
        LinkKind::Url if link.contains("://") => Some(link.to_owned()),
        LinkKind::Url
            if link
                .get(..4)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("www.")) =>
        {
            Some(format!("http://{link}"))
        }
        LinkKind::Email => Some(format!("mailto:{link}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scheme_and_www_links() {
        assert_eq!(
            autolink("See https://example.com and www.example.org"),
            concat!(
                r#"See <a href="https://example.com">https://example.com</a> and "#,
                r#"<a href="http://www.example.org">www.example.org</a>"#
            )
        );
    }

    #[test]
    fn test_email() {
        assert_eq!(
            autolink("mail me@example.com"),
            r#"mail <a href="mailto:me@example.com">me@example.com</a>"#
        );
    }

    #[test]
    fn test_trailing_punctuation_excluded() {
        assert_eq!(
            autolink("(https://example.com/a)."),
            r#"(<a href="https://example.com/a">https://example.com/a</a>)."#
        );
    }

    #[test]
    fn test_bare_domain_stays_text() {
        assert_eq!(autolink("open notes.md & c"), "open notes.md &amp; c");
    }

    #[test]
    fn test_query_is_escaped() {
        assert_eq!(
            autolink("https://example.com/?a=1&b=2"),
            r#"<a href="https://example.com/?a=1&amp;b=2">https://example.com/?a=1&amp;b=2</a>"#
        );
    }
}
