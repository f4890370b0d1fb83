// ABOUTME: Build driver standing in for the host site generator
// ABOUTME: Runs the slides transform over every page of a docs tree and writes the results

use crate::config::Config;
use crate::errors::{Result, SlidesError};
use crate::output;
use crate::page::Page;
use crate::resources;
use crate::scanner::SlidesProcessor;
use crate::utils;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Counts from one build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub pages_with_slides: usize,
    pub slide_files_written: usize,
}

/// One page after the transform and flush
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPage {
    pub markdown: String,
    pub has_slides: bool,
    pub files_written: usize,
}

/// Transform one page the way the host hooks run it: rewrite blocks, then
/// flush queued slide documents and prefix the asset tags if any block was found.
pub fn process_page(
    processor: &SlidesProcessor,
    config: &Config,
    page: &Page,
    markdown: &str,
) -> Result<ProcessedPage> {
    let transformed = processor.process_markdown(markdown, page, config);
    if !transformed.has_slides {
        return Ok(ProcessedPage {
            markdown: transformed.markdown,
            has_slides: false,
            files_written: 0,
        });
    }

    let files_written = processor.flush()?;
    let mut text = resources::head_tags(config, page).join("\n");
    text.push_str("\n\n");
    text.push_str(&transformed.markdown);
    Ok(ProcessedPage {
        markdown: text,
        has_slides: true,
        files_written,
    })
}

/// Markdown sources under the docs root, relative to it, in sorted order
pub fn find_pages(docs_dir: &Path) -> Result<Vec<PathBuf>> {
    let root = utils::normalize_path(docs_dir);
    let pattern = format!("{}/**/*.md", glob::Pattern::escape(&docs_dir.to_string_lossy()));
    let mut pages: Vec<PathBuf> = glob::glob(&pattern)?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .filter_map(|path| match utils::normalize_path(&path).strip_prefix(&root) {
            Ok(relative) => Some(relative.to_path_buf()),
            Err(_) => {
                warn!("Skipping {:?}: not under docs directory {:?}", path, docs_dir);
                None
            }
        })
        .collect();
    pages.sort();
    Ok(pages)
}

/// Fail unless the docs root exists and is a directory
pub fn require_docs_dir(docs_dir: &Path) -> Result<()> {
    if !docs_dir.is_dir() {
        return Err(SlidesError::PathNotFoundError(docs_dir.to_path_buf()));
    }
    Ok(())
}

/// Transform every page under `config.docs_dir` into `out_dir`, install
/// the deck assets into `config.site_dir`, and write standalone slides there.
pub fn build_site(config: &Config, out_dir: &Path) -> Result<BuildSummary> {
    require_docs_dir(&config.docs_dir)?;
    if utils::absolute_path(out_dir).starts_with(utils::absolute_path(&config.docs_dir)) {
        return Err(SlidesError::ValidationError(format!(
            "Output directory {:?} must not be inside the docs sources {:?}",
            out_dir, config.docs_dir
        )));
    }
    utils::ensure_directory_exists(out_dir)?;
    info!("Building pages from {:?} into {:?}", config.docs_dir, out_dir);

    let processor = SlidesProcessor::new(config)?;
    resources::install_assets(config)?;

    let mut summary = BuildSummary::default();
    for src_path in find_pages(&config.docs_dir)? {
        let page = Page::new(&src_path, config.use_directory_urls);
        let markdown = fs::read_to_string(config.docs_dir.join(&src_path))?;

        let processed = process_page(&processor, config, &page, &markdown)?;
        summary.pages += 1;
        if processed.has_slides {
            summary.pages_with_slides += 1;
        }
        summary.slide_files_written += processed.files_written;

        output::write_file(&processed.markdown, &out_dir.join(&src_path))?;
    }

    info!(
        "Processed {} page(s), {} with slides, {} slide file(s) written",
        summary.pages, summary.pages_with_slides, summary.slide_files_written
    );
    Ok(summary)
}
