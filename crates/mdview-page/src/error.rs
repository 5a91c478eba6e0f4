//! Error types for page rendering.

use mdview_renderer::ConvertError;

/// Error building a page snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("invalid page URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Reason a render attempt failed. The document is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No conversion capability was supplied.
    #[error("markdown converter not available")]
    MissingConverter,
    /// The converter reported an error.
    #[error("markdown conversion failed: {0}")]
    ConversionFailure(#[source] ConvertError),
}
