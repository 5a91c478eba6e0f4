//! The conversion capability handed to page rendering.

use crate::renderer::{MarkdownRenderer, RenderResult};

/// Error raised by a [`Converter`].
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Input exceeds the configured size limit.
    #[error("markdown input is {size} bytes, limit is {limit} bytes")]
    InputTooLarge {
        /// Input size in bytes.
        size: usize,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// Converter-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Capability that turns Markdown text into an HTML fragment.
pub trait Converter {
    fn convert(&self, markdown: &str) -> Result<RenderResult, ConvertError>;
}

/// Conversion settings.
///
/// Raw HTML in the source is never escaped or sanitized, and generated
/// identifiers are emitted verbatim; neither is configurable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// GitHub Flavored Markdown extensions (tables, strikethrough, task lists, alerts).
    pub gfm: bool,
    /// Render a single newline inside a paragraph as `<br>`.
    pub breaks: bool,
    /// Add `id` attributes derived from heading text.
    pub header_ids: bool,
    /// Reject inputs larger than this many bytes.
    pub max_input_bytes: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            header_ids: true,
            max_input_bytes: None,
        }
    }
}

/// [`Converter`] backed by [`MarkdownRenderer`].
#[derive(Clone, Debug, Default)]
pub struct MarkdownConverter {
    options: RenderOptions,
}

impl MarkdownConverter {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }
}

impl Converter for MarkdownConverter {
    fn convert(&self, markdown: &str) -> Result<RenderResult, ConvertError> {
        if let Some(limit) = self.options.max_input_bytes
            && markdown.len() > limit
        {
            return Err(ConvertError::InputTooLarge {
                size: markdown.len(),
                limit,
            });
        }

        let result = MarkdownRenderer::new()
            .with_gfm(self.options.gfm)
            .with_breaks(self.options.breaks)
            .with_header_ids(self.options.header_ids)
            .render_markdown(markdown);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_options() {
        let converter = MarkdownConverter::default();
        assert!(converter.options().gfm);
        assert!(converter.options().breaks);
        assert!(converter.options().header_ids);
        assert_eq!(converter.options().max_input_bytes, None);
    }

    #[test]
    fn test_title_and_line_breaks() {
        let converter = MarkdownConverter::default();
        let result = converter.convert("# Title\nline1\nline2").unwrap();
        assert_eq!(
            result.html,
            "<h1 id=\"title\">Title</h1><p>line1<br>\nline2</p>"
        );
    }

    #[test]
    fn test_breaks_disabled() {
        let converter = MarkdownConverter::new(RenderOptions {
            breaks: false,
            ..RenderOptions::default()
        });
        let result = converter.convert("line1\nline2").unwrap();
        assert_eq!(result.html, "<p>line1\nline2</p>");
    }

    #[test]
    fn test_input_limit() {
        let converter = MarkdownConverter::new(RenderOptions {
            max_input_bytes: Some(4),
            ..RenderOptions::default()
        });
        let err = converter.convert("# Too long").unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InputTooLarge { size: 10, limit: 4 }
        ));
        assert!(converter.convert("# Ok").is_ok());
    }
}
