//! Raw Markdown page classification.

use crate::document::Location;

/// Content types under which browsers show Markdown as plain text.
pub const MARKDOWN_CONTENT_TYPES: &[&str] = &["text/plain", "text/markdown"];

/// Classifies pages as raw Markdown by URL suffix and content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detector {
    /// Lowercase suffixes including the dot, e.g. `.md`.
    suffixes: Vec<String>,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(["md"])
    }
}

impl Detector {
    /// Create a detector for the given file extensions (with or without dot).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let suffixes = extensions
            .into_iter()
            .map(|ext| format!(".{}", ext.as_ref().trim_start_matches('.')).to_ascii_lowercase())
            .collect();
        Self { suffixes }
    }

    /// Decide whether the page is a raw Markdown document.
    ///
    /// A path ending in a Markdown suffix is sufficient on its own. Failing
    /// that, a plain-text or Markdown content type is accepted only when the
    /// full URL (query and fragment included) ends in the suffix.
    #[must_use]
    pub fn is_markdown(&self, location: &Location, content_type: &str) -> bool {
        if self.has_suffix(location.pathname()) {
            return true;
        }

        MARKDOWN_CONTENT_TYPES.contains(&content_type) && self.has_suffix(location.href())
    }

    fn has_suffix(&self, s: &str) -> bool {
        self.suffixes
            .iter()
            .any(|suffix| ends_with_ignore_ascii_case(s, suffix))
    }
}

/// Classify with the default `.md` detector.
#[must_use]
pub fn is_markdown_page(location: &Location, content_type: &str) -> bool {
    Detector::default().is_markdown(location, content_type)
}

fn ends_with_ignore_ascii_case(s: &str, suffix: &str) -> bool {
    s.len()
        .checked_sub(suffix.len())
        .and_then(|start| s.get(start..))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(url: &str) -> Location {
        Location::parse(url).unwrap()
    }

    const CONTENT_TYPES: &[&str] = &[
        "text/html",
        "text/plain",
        "text/markdown",
        "application/octet-stream",
        "",
    ];

    #[test]
    fn test_md_path_any_content_type() {
        for url in [
            "https://example.com/readme.md",
            "https://example.com/README.MD",
            "https://example.com/docs/Guide.Md",
            "https://example.com/notes.md?plain=1",
            "https://example.com/notes.md#usage",
            "file:///home/user/todo.md",
        ] {
            for content_type in CONTENT_TYPES {
                assert!(
                    is_markdown_page(&loc(url), content_type),
                    "{url} as {content_type}"
                );
            }
        }
    }

    #[test]
    fn test_non_md_url_any_content_type() {
        for url in [
            "https://example.com/notes.txt",
            "https://example.com/",
            "https://example.com/readme.markdown",
            "https://example.com/md",
            "https://example.com/readme.md/",
            "https://example.com/readme.mdx",
        ] {
            for content_type in CONTENT_TYPES {
                assert!(
                    !is_markdown_page(&loc(url), content_type),
                    "{url} as {content_type}"
                );
            }
        }
    }

    #[test]
    fn test_content_type_branch_needs_href_suffix() {
        // Only the query string carries the suffix
        let location = loc("https://example.com/view?file=readme.md");
        assert!(is_markdown_page(&location, "text/plain"));
        assert!(is_markdown_page(&location, "text/markdown"));
        assert!(!is_markdown_page(&location, "text/html"));
    }

    #[test]
    fn test_custom_extensions() {
        let detector = Detector::new([".markdown", "MD"]);
        assert!(detector.is_markdown(&loc("https://example.com/a.markdown"), "text/html"));
        assert!(detector.is_markdown(&loc("https://example.com/a.md"), "text/html"));
        assert!(!detector.is_markdown(&loc("https://example.com/a.txt"), "text/plain"));
    }

    #[test]
    fn test_suffix_check_is_char_boundary_safe() {
        assert!(!ends_with_ignore_ascii_case("é", ".md"));
        assert!(!ends_with_ignore_ascii_case("aéé", ".md"));
        assert!(ends_with_ignore_ascii_case("A.MD", ".md"));
    }
}
