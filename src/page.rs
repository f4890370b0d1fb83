// ABOUTME: Page identity used when resolving slide paths and relative links
// ABOUTME: Maps a source path under the docs root to the URL it is published at

use std::path::{Path, PathBuf};

/// The page currently being transformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Source path relative to the documentation root
    pub src_path: PathBuf,
    /// Output URL relative to the site root, e.g. `guide/intro/`
    pub url: String,
}

impl Page {
    pub fn new(src_path: impl Into<PathBuf>, use_directory_urls: bool) -> Self {
        let src_path = src_path.into();
        let url = page_url(&src_path, use_directory_urls);
        Self { src_path, url }
    }

    /// For hosts that compute their own URLs
    pub fn with_url(src_path: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            src_path: src_path.into(),
            url: url.into().trim_start_matches('/').to_string(),
        }
    }

    /// Directory holding the page source, as an absolute-or-docs-relative path
    pub fn source_dir(&self, docs_dir: &Path) -> PathBuf {
        match docs_dir.join(&self.src_path).parent() {
            Some(parent) => parent.to_path_buf(),
            None => docs_dir.to_path_buf(),
        }
    }
}

fn page_url(src_path: &Path, use_directory_urls: bool) -> String {
    let components: Vec<String> = src_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let Some((file_name, dirs)) = components.split_last() else {
        return String::new();
    };

    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut parts: Vec<String> = dirs.to_vec();

    if stem == "index" || stem == "README" {
        let dir = parts.join("/");
        return if dir.is_empty() { dir } else { format!("{}/", dir) };
    }

    if use_directory_urls {
        parts.push(stem);
        format!("{}/", parts.join("/"))
    } else {
        parts.push(format!("{}.html", stem));
        parts.join("/")
    }
}
