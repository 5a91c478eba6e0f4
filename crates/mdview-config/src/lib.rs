//! Configuration management for mdview.
//!
//! Parses `mdview.toml` with serde and discovers it in the current directory
//! or its parents. Every section is optional:
//!
//! ```toml
//! [detect]
//! extensions = ["md"]
//!
//! [render]
//! gfm = true
//! breaks = true
//! header_ids = true
//! max_input_bytes = 0   # 0 disables the limit
//!
//! [markers]
//! container_class = "markdown-body"
//! body_class = "markdown-rendered"
//! ```
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdview.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliSettings {
    /// Override GFM extensions.
    pub gfm: Option<bool>,
    /// Override newline-to-`<br>` conversion.
    pub breaks: Option<bool>,
    /// Override heading id generation.
    pub header_ids: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page detection configuration.
    pub detect: DetectConfig,
    /// Markdown conversion configuration.
    pub render: RenderConfig,
    /// CSS marker class configuration.
    pub markers: MarkersConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Page detection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectConfig {
    /// File extensions treated as Markdown, without the dot.
    pub extensions: Vec<String>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_owned()],
        }
    }
}

/// Markdown conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// GitHub Flavored Markdown extensions.
    pub gfm: bool,
    /// Convert single newlines to `<br>`.
    pub breaks: bool,
    /// Generate heading ids.
    pub header_ids: bool,
    /// Maximum input size in bytes; 0 means unlimited.
    pub max_input_bytes: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
            header_ids: true,
            max_input_bytes: 0,
        }
    }
}

impl RenderConfig {
    /// Input size limit, `None` when unlimited.
    #[must_use]
    pub fn input_limit(&self) -> Option<usize> {
        (self.max_input_bytes > 0).then_some(self.max_input_bytes)
    }
}

/// CSS marker class configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkersConfig {
    /// Class of the rendered content container.
    pub container_class: String,
    /// Class added to `<body>` after rendering.
    pub body_class: String,
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            container_class: "markdown-body".to_owned(),
            body_class: "markdown-rendered".to_owned(),
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a CSS class name: non-empty and free of whitespace.
fn require_class_name(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single class name"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdview.toml` in the current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(gfm) = settings.gfm {
            self.render.gfm = gfm;
        }
        if let Some(breaks) = settings.breaks {
            self.render.breaks = breaks;
        }
        if let Some(header_ids) = settings.header_ids {
            self.render.header_ids = header_ids;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_detect()?;
        require_class_name(&self.markers.container_class, "markers.container_class")?;
        require_class_name(&self.markers.body_class, "markers.body_class")?;
        Ok(())
    }

    fn validate_detect(&self) -> Result<(), ConfigError> {
        if self.detect.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "detect.extensions cannot be empty".to_owned(),
            ));
        }
        for ext in &self.detect.extensions {
            let bare = ext.trim_start_matches('.');
            if bare.is_empty() || bare.contains(['/', '?', '#']) {
                return Err(ConfigError::Validation(format!(
                    "detect.extensions contains invalid extension {ext:?}"
                )));
            }
        }
        Ok(())
    }
}
