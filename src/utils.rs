// ABOUTME: Utility functions for the doc-slides plugin
// ABOUTME: Directory creation, path normalization, HTML escaping and relative URL helpers

use crate::errors::{Result, SlidesError};
use log::debug;
use std::path::{Component, Path, PathBuf};
use url::Url;

// Only used as a base for resolving site-relative links against each other
const SITE_ROOT: &str = "http://site.invalid/";

/// Ensure a directory exists, creating it if necessary
pub fn ensure_directory_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    } else if !path.is_dir() {
        return Err(SlidesError::ValidationError(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Ensure a file's parent directory exists
pub fn ensure_parent_directory_exists(file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory_exists(parent)?;
        }
    }
    Ok(())
}

/// Get the absolute path
pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(path).map_err(|e| {
        SlidesError::ValidationError(format!("Failed to get absolute path for {:?}: {}", path, e))
    })
}

/// Absolute, lexically normalized form of a path that may not exist yet
pub fn absolute_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_path(&absolute)
}

/// Resolve `.` and `..` components without touching the filesystem
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Join path components with `/`, dropping `.` and any root prefix
pub fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Link from the page published at `from_page` to a file at the site-relative
/// path `to_site_path`. Falls back to a root-absolute link.
pub fn relative_url(from_page: &str, to_site_path: &str) -> String {
    let absolute = format!("/{}", to_site_path.trim_start_matches('/'));

    let resolved = Url::parse(SITE_ROOT).and_then(|root| {
        let from = root.join(from_page.trim_start_matches('/'))?;
        let to = root.join(to_site_path.trim_start_matches('/'))?;
        Ok((from, to))
    });

    match resolved {
        Ok((from, to)) => from.make_relative(&to).unwrap_or(absolute),
        Err(e) => {
            debug!("Could not relativise {} from {}: {}", to_site_path, from_page, e);
            absolute
        }
    }
}

/// Escape text for use in element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
