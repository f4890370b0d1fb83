// ABOUTME: Configuration module for the doc-slides plugin
// ABOUTME: Host settings, style knobs and their defaults, file and environment loading

use crate::errors::{Result, SlidesError};
use log::debug;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How slides are embedded in the deck markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SlideMode {
    /// Slide HTML is placed directly in the page
    #[default]
    Inline,
    /// Each slide is written to its own document and loaded in an iframe
    Framed,
}

impl FromStr for SlideMode {
    type Err = SlidesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "inline" => Ok(SlideMode::Inline),
            "framed" | "iframe" => Ok(SlideMode::Framed),
            other => Err(SlidesError::ConfigError(format!(
                "Unknown slide mode: {} (expected 'inline' or 'framed')",
                other
            ))),
        }
    }
}

impl fmt::Display for SlideMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlideMode::Inline => f.write_str("inline"),
            SlideMode::Framed => f.write_str("framed"),
        }
    }
}

/// Style knobs carried into the deck as CSS custom properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub padding: String,
    pub max_width: String,
    pub aspect_ratio: String,
    pub font_size: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            padding: "64px".to_string(),
            max_width: "1200px".to_string(),
            aspect_ratio: "16/9".to_string(),
            font_size: "32px".to_string(),
        }
    }
}

impl RenderOptions {
    /// Return a copy with every knob present in `overrides` replaced
    pub fn merged(&self, overrides: &StyleOverrides) -> RenderOptions {
        let pick = |value: &Option<String>, fallback: &String| {
            value.clone().unwrap_or_else(|| fallback.clone())
        };

        RenderOptions {
            padding: pick(&overrides.padding, &self.padding),
            max_width: pick(&overrides.max_width, &self.max_width),
            aspect_ratio: pick(&overrides.aspect_ratio, &self.aspect_ratio),
            font_size: pick(&overrides.font_size, &self.font_size),
        }
    }

    /// The inline style declaration placed on the deck root
    pub fn css_custom_properties(&self) -> String {
        format!(
            "--slide-padding: {}; --slide-max-width: {}; --slide-aspect-ratio: {}; --slide-font-size: {};",
            self.padding, self.max_width, self.aspect_ratio, self.font_size
        )
    }
}

/// Site-wide style overrides; missing keys keep the processor defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleOverrides {
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default, alias = "maxWidth")]
    pub max_width: Option<String>,
    #[serde(default, alias = "aspectRatio")]
    pub aspect_ratio: Option<String>,
    #[serde(default, alias = "fontSize")]
    pub font_size: Option<String>,
}

/// Host configuration handed to every page transform
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the documentation sources
    pub docs_dir: PathBuf,
    /// Root of the build output
    pub site_dir: PathBuf,
    /// `a/b.md` maps to `a/b/` when set, `a/b.html` otherwise
    pub use_directory_urls: bool,
    pub mode: SlideMode,
    /// Extension identifiers for slide conversion; `None` uses the default set
    pub markdown_extensions: Option<Vec<String>>,
    pub style: StyleOverrides,
    /// Custom template for standalone slide documents (framed mode)
    pub template: Option<PathBuf>,
    /// Replacement for the bundled stylesheet
    pub stylesheet: Option<PathBuf>,
    /// Replacement for the bundled script
    pub script: Option<PathBuf>,
    pub debounce_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            site_dir: PathBuf::from("site"),
            use_directory_urls: true,
            mode: SlideMode::Inline,
            markdown_extensions: None,
            style: StyleOverrides::default(),
            template: None,
            stylesheet: None,
            script: None,
            debounce_ms: 500,
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new(docs_dir: impl Into<PathBuf>, site_dir: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            site_dir: site_dir.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file. Relative paths inside the file
    /// are resolved against the file's directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {:?}", path);
        if !path.exists() {
            return Err(SlidesError::PathNotFoundError(path.to_path_buf()));
        }

        let text = fs::read_to_string(path)?;
        let mut config: Config = if text.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml_ng::from_str(&text)?
        };

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Overlay the `SLIDES_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(dir) = env::var("SLIDES_DOCS_DIR") {
            self.docs_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("SLIDES_SITE_DIR") {
            self.site_dir = PathBuf::from(dir);
        }
        if let Ok(mode) = env::var("SLIDES_MODE") {
            self.mode = mode.parse()?;
        }
        if let Ok(template) = env::var("SLIDES_TEMPLATE") {
            self.template = Some(PathBuf::from(template));
        }
        Ok(())
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        rebase(&mut self.docs_dir);
        rebase(&mut self.site_dir);
        for path in [&mut self.template, &mut self.stylesheet, &mut self.script]
            .into_iter()
            .flatten()
        {
            rebase(path);
        }
    }
}
