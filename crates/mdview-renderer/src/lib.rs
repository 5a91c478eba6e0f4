//! Markdown to HTML conversion for mdview.
//!
//! Tokenizing is done by `pulldown-cmark`; this crate owns the HTML writer
//! and exposes it through the [`Converter`] trait so callers can inject the
//! capability (or a test double) instead of discovering it globally.
//!
//! # Architecture
//!
//! - [`MarkdownRenderer`] walks parser events and writes GitHub-style HTML5
//!   suitable for a `markdown-body` stylesheet. Bare URLs are linked with
//!   `linkify` when GFM is on.
//! - [`MarkdownConverter`] configures it from [`RenderOptions`].
//!
//! # Example
//!
//! ```
//! use mdview_renderer::{Converter, MarkdownConverter, RenderOptions};
//!
//! let converter = MarkdownConverter::new(RenderOptions::default());
//! let result = converter.convert("# Title\nline1\nline2").unwrap();
//! assert!(result.html.contains(r#"<h1 id="title">Title</h1>"#));
//! ```

mod autolink;
mod converter;
mod html;
mod renderer;
mod state;

pub use converter::{ConvertError, Converter, MarkdownConverter, RenderOptions};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{escape_html, slugify};
