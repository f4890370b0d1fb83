// ABOUTME: Deck rendering module for the doc-slides plugin
// ABOUTME: Assembles the deck container markup and renders standalone slide documents

use crate::config::{RenderOptions, SlideMode};
use crate::deck::{DeckConfig, SlideRecord};
use crate::errors::{Result, SlidesError};
use crate::utils::escape_html;
use log::info;
use std::path::Path;
use tera::{Context, Tera};

const TEMPLATE_NAME: &str = "slide.html";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{ title }}</title>
<link rel="stylesheet" href="{{ stylesheet | safe }}">
</head>
<body class="slide-standalone" style="{{ style | safe }}">
<div class="slide-content">
{{ content | safe }}
</div>
</body>
</html>
"#;

/// Build the deck container that replaces a `slides` block
pub fn render_deck(
    deck: &DeckConfig,
    slides: &[SlideRecord],
    options: &RenderOptions,
    mode: SlideMode,
) -> String {
    let id = deck.element_id();
    let mut html = format!(
        r#"<div class="slides-deck" id="{}" data-deck="{}" data-title="{}" data-mode="{}" style="{}">"#,
        id,
        escape_html(&deck.url_stub),
        escape_html(&deck.title),
        mode,
        escape_html(&options.css_custom_properties())
    );

    html.push_str(r#"<div class="slides-viewport">"#);
    for (i, slide) in slides.iter().enumerate() {
        let display = if i == 0 { "block" } else { "none" };
        match &slide.html_path {
            Some(src) => html.push_str(&format!(
                r#"<iframe class="slide-frame" id="{}-{}" data-index="{}" src="{}" title="{}" loading="lazy" style="display: {}"></iframe>"#,
                id,
                i + 1,
                i,
                escape_html(src),
                escape_html(&slide.title),
                display
            )),
            None => html.push_str(&format!(
                r#"<div class="slide" id="{}-{}" data-index="{}" data-title="{}" style="display: {}">{}</div>"#,
                id,
                i + 1,
                i,
                escape_html(&slide.title),
                display,
                slide.content
            )),
        }
    }
    html.push_str("</div>");

    if mode == SlideMode::Inline {
        html.push_str(r#"<div class="slides-overview">"#);
        html.push_str(r#"<button class="overview-close" title="Close overview (Esc)">×</button>"#);
        for (i, slide) in slides.iter().enumerate() {
            html.push_str(&format!(
                r#"<div class="overview-slide" data-index="{}" title="{}">"#,
                i,
                escape_html(&slide.title)
            ));
            html.push_str(&slide.content);
            html.push_str(&format!(r#"<span class="overview-number">{}</span>"#, i + 1));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }

    html.push_str(r#"<div class="slides-controls">"#);
    html.push_str(r#"<div class="nav-controls">"#);
    html.push_str(r#"<button class="prev-slide" title="Previous (← Left arrow)">←</button>"#);
    html.push_str(&format!(
        r#"<span class="slide-progress">1 / {}</span>"#,
        slides.len()
    ));
    html.push_str(r#"<button class="next-slide" title="Next (→ Right arrow)">→</button>"#);
    html.push_str("</div>");
    html.push_str(r#"<div class="button-group">"#);
    if mode == SlideMode::Inline {
        html.push_str(r#"<button class="overview-toggle" title="Toggle overview (O)">⊞</button>"#);
    }
    html.push_str(r#"<button class="fullscreen-toggle" title="Toggle fullscreen (F)">⛶</button>"#);
    html.push_str("</div>");
    html.push_str("</div>");

    if mode == SlideMode::Inline {
        html.push_str(r#"<div class="mobile-nav">"#);
        html.push_str(r#"<button class="mobile-prev">←</button>"#);
        html.push_str(r#"<button class="mobile-overview">⊞</button>"#);
        html.push_str(r#"<button class="mobile-next">→</button>"#);
        html.push_str("</div>");
        html.push_str(r#"<button class="mobile-close">×</button>"#);
    }

    html.push_str("</div>");
    html
}

/// Fragment shown in place of a block that could not be rendered
pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="slides-error">Error processing slides: {}</div>"#,
        escape_html(message)
    )
}

/// Template for the standalone documents loaded by framed decks
#[derive(Debug)]
pub struct SlideTemplate {
    tera: Tera,
}

impl SlideTemplate {
    /// The built-in template
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Self { tera })
    }

    /// A user template. It receives `title`, `content`, `stylesheet` and `style`.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SlidesError::PathNotFoundError(path.to_path_buf()));
        }
        info!("Using slide template: {:?}", path);

        let mut tera = Tera::default();
        tera.add_template_file(path, Some(TEMPLATE_NAME))?;
        Ok(Self { tera })
    }

    pub fn load(custom: Option<&Path>) -> Result<Self> {
        match custom {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Render one slide; `stylesheet` is the link from the slide document to the deck stylesheet
    pub fn render(
        &self,
        title: &str,
        content: &str,
        stylesheet: &str,
        options: &RenderOptions,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("content", content);
        context.insert("stylesheet", stylesheet);
        context.insert("style", &options.css_custom_properties());
        Ok(self.tera.render(TEMPLATE_NAME, &context)?)
    }
}
