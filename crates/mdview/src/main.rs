//! mdview CLI - render raw Markdown pages.
//!
//! Provides commands for:
//! - `render`: Render a saved page or Markdown file as the browser would
//! - `detect`: Classify a URL and content type as raw Markdown or not

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DetectArgs, RenderArgs};
use output::Output;

/// mdview - render raw Markdown pages.
#[derive(Parser)]
#[command(name = "mdview", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a page snapshot or Markdown file to HTML.
    Render(RenderArgs),
    /// Report whether a URL would be treated as raw Markdown.
    Detect(DetectArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = matches!(&cli.command, Commands::Render(args) if args.verbose);

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Detect(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

/// `--verbose` enables INFO level, otherwise use `RUST_LOG` or default to WARN.
fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_log_filter_is_info() {
        assert!(log_filter(true).to_string().eq_ignore_ascii_case("info"));
    }
}
