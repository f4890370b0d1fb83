// ABOUTME: Deck data model for the doc-slides plugin
// ABOUTME: Parses and validates the YAML body of a slides block; defines the per-slide record

use crate::errors::{Result, SlidesError};
use serde::Deserialize;

/// Validated contents of one `slides` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckConfig {
    pub title: String,
    /// Namespaces the deck's element ids
    pub url_stub: String,
    /// Slide paths in presentation order
    pub nav: Vec<String>,
}

// Every key optional so a missing one is reported by name rather than as a serde error
#[derive(Debug, Deserialize)]
struct RawDeckConfig {
    title: Option<String>,
    url_stub: Option<String>,
    nav: Option<Vec<String>>,
}

impl DeckConfig {
    /// Parse a block body. Common indentation is removed first so blocks
    /// nested in lists or admonitions still parse.
    pub fn parse(body: &str) -> Result<Self> {
        let text = dedent(body);
        if text.trim().is_empty() {
            return Err(SlidesError::ConfigValidationError(
                "Empty slides configuration".to_string(),
            ));
        }

        let raw: RawDeckConfig = serde_yaml_ng::from_str(&text).map_err(|e| {
            SlidesError::ConfigValidationError(format!("Could not parse slides block: {}", e))
        })?;

        let mut missing = Vec::new();
        if raw.title.is_none() {
            missing.push("title");
        }
        if raw.url_stub.is_none() {
            missing.push("url_stub");
        }
        if raw.nav.is_none() {
            missing.push("nav");
        }

        match (raw.title, raw.url_stub, raw.nav) {
            (Some(title), Some(url_stub), Some(nav)) => {
                if nav.is_empty() {
                    return Err(SlidesError::ConfigValidationError(
                        "nav must list at least one slide".to_string(),
                    ));
                }
                Ok(DeckConfig {
                    title,
                    url_stub,
                    nav,
                })
            }
            _ => Err(SlidesError::ConfigValidationError(format!(
                "Missing required fields in slides configuration: {}",
                missing.join(", ")
            ))),
        }
    }

    /// `url_stub` reduced to characters safe in an element id
    pub fn element_id(&self) -> String {
        let slug: String = self
            .url_stub
            .trim()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect();
        format!("slides-{}", slug.trim_matches('-'))
    }
}

/// One converted slide ready for the deck
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideRecord {
    pub content: String,
    pub title: String,
    /// Link to the standalone document, relative to the current page (framed mode)
    pub html_path: Option<String>,
}

/// Strip the indentation shared by all non-blank lines
fn dedent(body: &str) -> String {
    let indent = body
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    body.lines()
        .map(|line| line.get(indent..).unwrap_or_else(|| line.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}
