// ABOUTME: Block scanner for the doc-slides plugin
// ABOUTME: Finds slides blocks in page markdown and replaces each with deck markup or an inline error

use crate::config::{Config, RenderOptions};
use crate::deck::DeckConfig;
use crate::errors::Result;
use crate::markdown::MarkdownExtensions;
use crate::page::Page;
use crate::render::{self, SlideTemplate};
use crate::resolve::{RenderContext, SlideResolver};
use log::{debug, warn};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Opening fence must be exactly `slides`; the body runs to the nearest closing fence
static SLIDES_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```slides[ \t]*\r?\n(.*?)```").expect("valid slides block regex")
});

/// Result of transforming one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub markdown: String,
    /// At least one block was found, so the page needs the deck assets and a flush
    pub has_slides: bool,
}

/// True when the markdown holds at least one slides block
pub fn contains_slides(markdown: &str) -> bool {
    SLIDES_BLOCK_RE.is_match(markdown)
}

/// Rewrites slides blocks in page markdown. One instance lives for a whole build.
#[derive(Debug)]
pub struct SlidesProcessor {
    defaults: RenderOptions,
    resolver: SlideResolver,
}

impl SlidesProcessor {
    /// Processor with the built-in style defaults and the template named in the config
    pub fn new(config: &Config) -> Result<Self> {
        let template = SlideTemplate::load(config.template.as_deref())?;
        Ok(Self {
            defaults: RenderOptions::default(),
            resolver: SlideResolver::new(template),
        })
    }

    /// Replace the default style options wholesale
    pub fn set_render_options(&mut self, options: RenderOptions) {
        self.defaults = options;
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.defaults
    }

    pub fn resolver(&self) -> &SlideResolver {
        &self.resolver
    }

    /// Replace every slides block in `markdown`. Failures are rendered in
    /// place of the failing block; text outside blocks is left untouched.
    pub fn process_markdown(&self, markdown: &str, page: &Page, config: &Config) -> Transformed {
        if !contains_slides(markdown) {
            return Transformed {
                markdown: markdown.to_string(),
                has_slides: false,
            };
        }

        let options = self.defaults.merged(&config.style);
        let extensions = MarkdownExtensions::from_config(config.markdown_extensions.as_deref());
        let ctx = RenderContext {
            page,
            docs_dir: &config.docs_dir,
            site_dir: &config.site_dir,
            options: &options,
            mode: config.mode,
            extensions: &extensions,
        };

        let replaced = SLIDES_BLOCK_RE.replace_all(markdown, |caps: &Captures| {
            match self.render_block(&caps[1], &ctx) {
                Ok(html) => html,
                Err(e) => {
                    warn!("Error processing slides in {:?}: {}", page.src_path, e);
                    render::render_error(&e.to_string())
                }
            }
        });

        Transformed {
            markdown: replaced.into_owned(),
            has_slides: true,
        }
    }

    fn render_block(&self, body: &str, ctx: &RenderContext<'_>) -> Result<String> {
        let deck = DeckConfig::parse(body)?;
        debug!("Rendering deck '{}' with {} slide(s)", deck.title, deck.nav.len());

        let slides = self.resolver.load_slides(&deck.nav, ctx)?;
        Ok(render::render_deck(&deck, &slides, ctx.options, ctx.mode))
    }

    /// Write the standalone documents queued so far
    pub fn flush(&self) -> Result<usize> {
        self.resolver.flush()
    }
}
