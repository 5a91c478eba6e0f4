//! Raw Markdown page rendering.
//!
//! When a browser opens a Markdown file served as plain text it shows the
//! source in a `<pre>`. [`PageRenderer`] recognises such pages and swaps the
//! body for rendered HTML:
//!
//! 1. [`Detector`] classifies the page by URL suffix and content type.
//! 2. [`extract_markdown`] pulls the source text out of the body.
//! 3. An injected [`Converter`](mdview_renderer::Converter) turns it into HTML.
//! 4. [`plan_replacement`] builds the new body content, and
//!    [`Replacement::apply`] writes it into the [`Document`].
//!
//! The document is an owned snapshot ([`Document`], [`Element`], [`Node`]),
//! parsed from saved HTML with `html5ever` or built from plain text.

mod detect;
mod document;
mod dom;
mod error;
mod extract;
mod gate;
mod page_renderer;
mod parse;
mod replace;

pub use detect::{Detector, MARKDOWN_CONTENT_TYPES, is_markdown_page};
pub use document::{Document, Location, ReadyState, mime_essence};
pub use dom::{Element, Node};
pub use error::{PageError, RenderError};
pub use extract::extract_markdown;
pub use gate::ReadinessGate;
pub use page_renderer::{Outcome, PageRenderer, RenderState, SkipReason};
pub use replace::{Markers, Replacement, plan_replacement};
