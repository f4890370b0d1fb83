// ABOUTME: Error types for the doc-slides plugin
// ABOUTME: Separates per-block failures (config, lookup, conversion) from build-level failures

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidesError {
    #[error("Failed to read file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Invalid slides configuration: {0}")]
    ConfigValidationError(String),

    #[error("Could not find slide file '{path}'. Tried:\n{}", list_candidates(.tried))]
    SlideNotFoundError { path: String, tried: Vec<PathBuf> },

    #[error("Conversion error: {0}")]
    ConversionError(String),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    #[error("Path not found: {0}")]
    PathNotFoundError(PathBuf),

    #[error("Input validation error: {0}")]
    ValidationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Watch error: {0}")]
    WatchError(String),
}

fn list_candidates(tried: &[PathBuf]) -> String {
    tried
        .iter()
        .map(|p| format!("- {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

// Template failures happen while rendering a slide, so they count as conversion errors
impl From<tera::Error> for SlidesError {
    fn from(err: tera::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        SlidesError::ConversionError(message)
    }
}

impl From<glob::PatternError> for SlidesError {
    fn from(err: glob::PatternError) -> Self {
        SlidesError::ValidationError(format!("Invalid page pattern: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlidesError>;
