//! `mdview detect` command implementation.

use std::path::PathBuf;

use clap::Args;
use console::Term;
use mdview_config::Config;
use mdview_page::{Detector, Location, mime_essence};

use crate::error::CliError;

/// Arguments for the detect command.
#[derive(Args)]
pub(crate) struct DetectArgs {
    /// Page URL.
    #[arg(long)]
    url: String,

    /// Content type the page was served with.
    #[arg(long, default_value = "text/plain")]
    content_type: String,

    /// Path to configuration file (default: auto-discover mdview.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl DetectArgs {
    /// Execute the detect command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the URL is not absolute.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let verdict = self.classify(&Detector::new(&config.detect.extensions))?;
        Term::stdout().write_line(verdict)?;
        Ok(())
    }

    fn classify(&self, detector: &Detector) -> Result<&'static str, CliError> {
        let location = Location::parse(&self.url)?;
        let is_markdown = detector.is_markdown(&location, &mime_essence(&self.content_type));
        tracing::debug!(url = %location, content_type = %self.content_type, is_markdown, "Classified page");
        Ok(if is_markdown { "markdown" } else { "not-markdown" })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn args(url: &str, content_type: &str) -> DetectArgs {
        DetectArgs {
            url: url.to_owned(),
            content_type: content_type.to_owned(),
            config: None,
        }
    }

    #[test]
    fn test_classify_markdown_path() {
        let verdict = args("https://example.com/README.MD", "text/html")
            .classify(&Detector::default())
            .unwrap();
        assert_eq!(verdict, "markdown");
    }

    #[test]
    fn test_classify_other_path() {
        let verdict = args("https://example.com/notes.txt", "text/plain")
            .classify(&Detector::default())
            .unwrap();
        assert_eq!(verdict, "not-markdown");
    }

    #[test]
    fn test_classify_content_type_with_parameters() {
        let verdict = args("https://example.com/view?file=a.md", "Text/Markdown; charset=utf-8")
            .classify(&Detector::default())
            .unwrap();
        assert_eq!(verdict, "markdown");
    }

    #[test]
    fn test_classify_custom_extensions() {
        let verdict = args("https://example.com/guide.markdown", "text/plain")
            .classify(&Detector::new(["md", "markdown"]))
            .unwrap();
        assert_eq!(verdict, "markdown");
    }

    #[test]
    fn test_classify_relative_url_fails() {
        let err = args("readme.md", "text/plain")
            .classify(&Detector::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Page(_)));
    }
}
