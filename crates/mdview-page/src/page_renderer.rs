//! Single-shot orchestration: detect, extract, convert, replace.

use std::fmt;

use mdview_renderer::Converter;

use crate::detect::Detector;
use crate::document::{Document, ReadyState};
use crate::error::RenderError;
use crate::extract::extract_markdown;
use crate::gate::ReadinessGate;
use crate::replace::{Markers, Replacement, plan_replacement};

/// Why a page was left alone without an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The page is not a raw Markdown document.
    NotMarkdown,
    /// The page has no non-whitespace text to render.
    EmptyContent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotMarkdown => f.write_str("not a markdown page"),
            Self::EmptyContent => f.write_str("no markdown content"),
        }
    }
}

/// Lifecycle of a [`PageRenderer`]. Every state but `Unrendered` is final.
#[derive(Debug)]
pub enum RenderState {
    Unrendered,
    Rendered,
    Skipped(SkipReason),
    Failed(RenderError),
}

impl RenderState {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unrendered)
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// What a render attempt would do to the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Render(Replacement),
    Skip(SkipReason),
}

/// Renders a raw Markdown page in place, at most once.
///
/// The converter is injected; `None` models a page where the conversion
/// capability is not available.
///
/// # Example
///
/// ```
/// use mdview_page::{Document, PageRenderer};
/// use mdview_renderer::MarkdownConverter;
///
/// let converter = MarkdownConverter::default();
/// let mut document =
///     Document::from_plain_text("https://example.com/readme.md", "text/plain", "# Hello")
///         .unwrap();
///
/// let mut renderer = PageRenderer::new(Some(&converter));
/// assert!(renderer.activate(&mut document).is_rendered());
/// assert!(document.body().has_class("markdown-rendered"));
/// ```
pub struct PageRenderer<'c> {
    converter: Option<&'c dyn Converter>,
    detector: Detector,
    markers: Markers,
    gate: ReadinessGate<()>,
    activated: bool,
    state: RenderState,
}

impl<'c> PageRenderer<'c> {
    #[must_use]
    pub fn new(converter: Option<&'c dyn Converter>) -> Self {
        Self {
            converter,
            detector: Detector::default(),
            markers: Markers::default(),
            gate: ReadinessGate::waiting(),
            activated: false,
            state: RenderState::Unrendered,
        }
    }

    #[must_use]
    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    #[must_use]
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    #[must_use]
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Consume the renderer, keeping only its final state.
    #[must_use]
    pub fn into_state(self) -> RenderState {
        self.state
    }

    /// Start the renderer for a page load.
    ///
    /// Runs immediately unless the document is still loading, in which case
    /// the run waits for [`document_ready`](Self::document_ready). Only the
    /// first activation counts.
    pub fn activate(&mut self, document: &mut Document) -> &RenderState {
        if self.activated {
            return &self.state;
        }
        self.activated = true;

        if document.ready_state() != ReadyState::Loading {
            self.gate.open();
        }
        if self.gate.submit(()).is_some() {
            self.run(document);
        } else {
            tracing::debug!(url = %document.location(), "Document loading, render deferred");
        }
        &self.state
    }

    /// Signal that the document finished loading (`DOMContentLoaded`).
    ///
    /// Runs a deferred activation exactly once; otherwise does nothing.
    pub fn document_ready(&mut self, document: &mut Document) -> &RenderState {
        if document.ready_state() == ReadyState::Loading {
            document.set_ready_state(ReadyState::Interactive);
        }
        if self.gate.open().is_some() {
            self.run(document);
        }
        &self.state
    }

    /// Work out what rendering would do without touching the document.
    pub fn dry_run(&self, document: &Document) -> Result<Outcome, RenderError> {
        if !self
            .detector
            .is_markdown(document.location(), document.content_type())
        {
            return Ok(Outcome::Skip(SkipReason::NotMarkdown));
        }

        let converter = self.converter.ok_or(RenderError::MissingConverter)?;

        let markdown = extract_markdown(document.body());
        if markdown.trim().is_empty() {
            return Ok(Outcome::Skip(SkipReason::EmptyContent));
        }

        let rendered = converter
            .convert(&markdown)
            .map_err(RenderError::ConversionFailure)?;

        Ok(Outcome::Render(
            plan_replacement(&rendered.html, &self.markers).with_title(rendered.title),
        ))
    }

    fn run(&mut self, document: &mut Document) {
        if self.state.is_terminal() {
            return;
        }

        self.state = match self.dry_run(document) {
            Ok(Outcome::Render(replacement)) => {
                replacement.apply(document);
                tracing::info!(url = %document.location(), "Rendered markdown page");
                RenderState::Rendered
            }
            Ok(Outcome::Skip(reason)) => {
                tracing::debug!(url = %document.location(), ?reason, "Page not rendered");
                RenderState::Skipped(reason)
            }
            Err(e) => {
                tracing::error!(url = %document.location(), error = %e, "Markdown rendering failed");
                RenderState::Failed(e)
            }
        };
    }
}
