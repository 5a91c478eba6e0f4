//! `mdview render` command implementation.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use console::Term;
use mdview_config::{CliSettings, Config};
use mdview_page::{Detector, Document, Markers, Outcome, PageRenderer, RenderState};
use mdview_renderer::{MarkdownConverter, RenderOptions};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Saved HTML page, or the raw response body with --raw (`-` reads stdin).
    input: PathBuf,

    /// URL the page was loaded from.
    #[arg(long)]
    url: String,

    /// Content type the page was served with.
    #[arg(long, default_value = "text/plain")]
    content_type: String,

    /// Treat the input as the raw response body instead of a saved page.
    #[arg(long)]
    raw: bool,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the planned replacement without rewriting the page.
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (default: auto-discover mdview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,

    /// Keep single newlines as soft breaks.
    #[arg(long)]
    no_breaks: bool,

    /// Do not add `id` attributes to headings.
    #[arg(long)]
    no_header_ids: bool,

    /// Enable verbose output (info logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or I/O fails, the URL is invalid,
    /// or rendering fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = Config::load(self.config.as_deref(), Some(&self.cli_settings()))?;
        let converter = MarkdownConverter::new(render_options(&config));
        let input = read_input(&self.input)?;
        let mut document = self.load_document(&input)?;

        let mut renderer = PageRenderer::new(Some(&converter))
            .with_detector(Detector::new(&config.detect.extensions))
            .with_markers(markers(&config));

        if self.dry_run {
            match renderer.dry_run(&document)? {
                Outcome::Render(replacement) => {
                    output.success(&format!("Would render {}", document.location()));
                    let html = replacement.container().outer_html();
                    write_output(self.output.as_deref(), &html)?;
                }
                Outcome::Skip(reason) => {
                    output.warning(&format!("Would skip {}: {reason}", document.location()));
                }
            }
            return Ok(());
        }

        renderer.activate(&mut document);
        match renderer.into_state() {
            RenderState::Rendered => {
                output.success(&format!("Rendered {}", document.location()));
            }
            RenderState::Skipped(reason) => {
                output.warning(&format!("Skipped {}: {reason}", document.location()));
            }
            RenderState::Failed(err) => return Err(err.into()),
            // Activation on a complete document always reaches a final state
            RenderState::Unrendered => {}
        }

        write_output(self.output.as_deref(), &document.to_html())
    }

    /// Map `--no-*` flags to config overrides.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            gfm: self.no_gfm.then_some(false),
            breaks: self.no_breaks.then_some(false),
            header_ids: self.no_header_ids.then_some(false),
        }
    }

    fn load_document(&self, input: &str) -> Result<Document, CliError> {
        let document = if self.raw {
            Document::from_plain_text(&self.url, &self.content_type, input)?
        } else {
            Document::parse_html(&self.url, &self.content_type, input)?
        };
        Ok(document)
    }
}

fn render_options(config: &Config) -> RenderOptions {
    RenderOptions {
        gfm: config.render.gfm,
        breaks: config.render.breaks,
        header_ids: config.render.header_ids,
        max_input_bytes: config.render.input_limit(),
    }
}

fn markers(config: &Config) -> Markers {
    Markers {
        container_class: config.markers.container_class.clone(),
        body_class: config.markers.body_class.clone(),
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn write_output(path: Option<&Path>, html: &str) -> Result<(), CliError> {
    match path {
        Some(path) => std::fs::write(path, html)?,
        None => Term::stdout().write_str(html)?,
    }
    Ok(())
}
