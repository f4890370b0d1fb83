// ABOUTME: Library module for the doc-slides plugin.
// ABOUTME: Turns slides blocks in documentation markdown into embedded slideshow markup.

// Reexport modules
pub mod config;
pub mod deck;
pub mod errors;
pub mod markdown;
pub mod output;
pub mod page;
pub mod render;
pub mod resolve;
pub mod resources;
pub mod scanner;
pub mod site;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use config::{Config, RenderOptions, SlideMode, StyleOverrides};
pub use deck::{DeckConfig, SlideRecord};
pub use errors::{Result, SlidesError};
pub use markdown::{extract_title, MarkdownExtension, MarkdownExtensions};
pub use output::{PendingFile, PendingQueue};
pub use page::Page;
pub use resolve::{resolve_slide_path, RenderContext, SlideResolver};
pub use resources::{head_tags, install_assets};
pub use scanner::{contains_slides, SlidesProcessor, Transformed};
pub use site::{build_site, process_page, BuildSummary, ProcessedPage};
pub use watch::watch_docs;
