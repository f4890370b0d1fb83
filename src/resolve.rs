// ABOUTME: Slide resolution module for the doc-slides plugin
// ABOUTME: Finds slide sources, converts them, and queues standalone documents in framed mode

use crate::config::{RenderOptions, SlideMode};
use crate::deck::SlideRecord;
use crate::errors::{Result, SlidesError};
use crate::markdown::{self, ConvertedSlide, MarkdownExtensions};
use crate::output::{PendingFile, PendingQueue};
use crate::page::Page;
use crate::render::SlideTemplate;
use crate::resources::STYLESHEET_PATH;
use crate::utils;
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory under the docs root that older decks keep their slides in
const LEGACY_SLIDES_DIR: &str = "slides";

/// Site-relative directory standalone slide documents are written to
const STANDALONE_DIR: &str = "slides";

/// Everything a slide needs to know about the page being built
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub page: &'a Page,
    pub docs_dir: &'a Path,
    pub site_dir: &'a Path,
    pub options: &'a RenderOptions,
    pub mode: SlideMode,
    pub extensions: &'a MarkdownExtensions,
}

/// Places a nav entry may live, in lookup order: next to the page,
/// under the docs root, under the legacy `slides/` directory.
pub fn candidate_paths(nav_path: &str, page: &Page, docs_dir: &Path) -> Vec<PathBuf> {
    let nav_path = nav_path.trim();
    let mut candidates = Vec::with_capacity(3);
    for base in [
        page.source_dir(docs_dir),
        docs_dir.to_path_buf(),
        docs_dir.join(LEGACY_SLIDES_DIR),
    ] {
        let candidate = utils::normalize_path(&base.join(nav_path));
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// First candidate that exists as a file
pub fn resolve_slide_path(nav_path: &str, page: &Page, docs_dir: &Path) -> Result<PathBuf> {
    let candidates = candidate_paths(nav_path, page, docs_dir);
    match candidates.iter().find(|candidate| candidate.is_file()) {
        Some(found) => {
            debug!("Resolved slide {} to {:?}", nav_path, found);
            Ok(found.clone())
        }
        None => Err(SlidesError::SlideNotFoundError {
            path: nav_path.to_string(),
            tried: candidates,
        }),
    }
}

/// Turns nav entries into slide records. Owns the queue of standalone
/// documents produced in framed mode until the host flushes it.
#[derive(Debug)]
pub struct SlideResolver {
    template: SlideTemplate,
    pending: PendingQueue,
}

impl SlideResolver {
    pub fn new(template: SlideTemplate) -> Self {
        Self {
            template,
            pending: PendingQueue::new(),
        }
    }

    /// Load every slide in order. The first failure fails the whole deck,
    /// and nothing from a failed deck reaches the queue.
    pub fn load_slides(&self, nav: &[String], ctx: &RenderContext<'_>) -> Result<Vec<SlideRecord>> {
        let mut slides = Vec::with_capacity(nav.len());
        let mut staged = Vec::new();
        for path in nav {
            let (slide, document) = self.load_slide(path, ctx)?;
            slides.push(slide);
            staged.extend(document);
        }

        for file in staged {
            self.pending.push(file.path, file.content);
        }
        info!(
            "Loaded {} slide(s) for page {:?}",
            slides.len(),
            ctx.page.src_path
        );
        Ok(slides)
    }

    fn load_slide(
        &self,
        nav_path: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<(SlideRecord, Option<PendingFile>)> {
        let source = resolve_slide_path(nav_path, ctx.page, ctx.docs_dir)?;
        let text = read_slide(&source)?;
        let ConvertedSlide { html, title } = markdown::convert_slide(&text, ctx.extensions)?;

        let (html_path, document) = match ctx.mode {
            SlideMode::Inline => (None, None),
            SlideMode::Framed => {
                let (link, file) = self.render_standalone(&source, &title, &html, ctx)?;
                (Some(link), Some(file))
            }
        };

        let slide = SlideRecord {
            content: html,
            title,
            html_path,
        };
        Ok((slide, document))
    }

    /// Render the standalone document and return its link from the page
    fn render_standalone(
        &self,
        source: &Path,
        title: &str,
        html: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<(String, PendingFile)> {
        let site_path = standalone_site_path(source, ctx.docs_dir);
        let stylesheet = utils::relative_url(&site_path, STYLESHEET_PATH);
        let content = self.template.render(title, html, &stylesheet, ctx.options)?;

        let file = PendingFile {
            path: ctx.site_dir.join(&site_path),
            content,
        };
        Ok((utils::relative_url(&ctx.page.url, &site_path), file))
    }

    /// Write queued standalone documents and clear the queue
    pub fn flush(&self) -> Result<usize> {
        self.pending.flush()
    }

    pub fn pending(&self) -> &PendingQueue {
        &self.pending
    }
}

fn read_slide(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => {
            SlidesError::ConversionError(format!("Slide {:?} is not valid UTF-8", path))
        }
        _ => SlidesError::FileReadError(e),
    })
}

/// `slides/<path under docs root>.html`; sources outside the docs root keep only their file name
pub fn standalone_site_path(source: &Path, docs_dir: &Path) -> String {
    let docs_dir = utils::normalize_path(docs_dir);
    let relative = match source.strip_prefix(&docs_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => source
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("slide")),
    };
    format!(
        "{}/{}",
        STANDALONE_DIR,
        utils::to_url_path(&relative.with_extension("html"))
    )
}
