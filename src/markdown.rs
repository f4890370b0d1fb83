// ABOUTME: Markdown conversion module for slide sources
// ABOUTME: Converts slide markdown to HTML with a configurable extension set and extracts titles

use crate::errors::{Result, SlidesError};
use crate::utils::escape_html;
use comrak::{markdown_to_html, ComrakOptions};
use log::warn;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Title used when a slide has no level-1 heading
pub const UNTITLED_SLIDE: &str = "Untitled Slide";

/// Fence languages handed to the client-side diagram renderer
const DIAGRAM_LANGUAGES: &[&str] = &["mermaid"];

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+?)[ \t]*\r?$").expect("valid title regex"));

static CODE_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<pre><code(?: class="language-([^"]+)")?>(.*?)</code></pre>"#)
        .expect("valid code block regex")
});

// The body may not cross a closing </p> or </hN>
static ATTR_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(h[1-6]|p)>((?:[^<]|<[^/]|</[^hp])*?)\s*\{:?[ \t]*([^{}<]*?)[ \t]*\}</(h[1-6]|p)>")
        .expect("valid attr list regex")
});

/// Markdown features that can be switched on for slide conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkdownExtension {
    /// Strip YAML front matter and take `title` from it
    Meta,
    Tables,
    /// Fenced code is part of CommonMark; accepted so configs listing it stay quiet
    FencedCode,
    /// `{: #id .class key=value}` on headings and paragraphs
    AttrList,
    /// Wrap code in `div.highlight` for the client highlighter
    Highlight,
    /// Route diagram fences to the diagram renderer
    SuperFences,
    Footnotes,
    Strikethrough,
    TaskList,
}

impl MarkdownExtension {
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let ext = match identifier.trim() {
            "meta" | "markdown.extensions.meta" => MarkdownExtension::Meta,
            "tables" | "markdown.extensions.tables" => MarkdownExtension::Tables,
            "fenced_code" | "markdown.extensions.fenced_code" => MarkdownExtension::FencedCode,
            "attr_list" | "markdown.extensions.attr_list" => MarkdownExtension::AttrList,
            "codehilite" | "highlight" | "pymdownx.highlight" => MarkdownExtension::Highlight,
            "superfences" | "pymdownx.superfences" => MarkdownExtension::SuperFences,
            "footnotes" | "markdown.extensions.footnotes" => MarkdownExtension::Footnotes,
            "strikethrough" | "pymdownx.tilde" => MarkdownExtension::Strikethrough,
            "tasklist" | "pymdownx.tasklist" => MarkdownExtension::TaskList,
            _ => return None,
        };
        Some(ext)
    }
}

/// The set of extensions applied to every slide of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExtensions {
    enabled: Vec<MarkdownExtension>,
}

impl Default for MarkdownExtensions {
    fn default() -> Self {
        Self {
            enabled: vec![
                MarkdownExtension::Meta,
                MarkdownExtension::Tables,
                MarkdownExtension::FencedCode,
                MarkdownExtension::AttrList,
                MarkdownExtension::Highlight,
                MarkdownExtension::SuperFences,
            ],
        }
    }
}

impl MarkdownExtensions {
    pub fn none() -> Self {
        Self {
            enabled: Vec::new(),
        }
    }

    /// Build from host identifiers. Unknown identifiers are logged and skipped.
    pub fn from_identifiers<S: AsRef<str>>(identifiers: &[S]) -> Self {
        let mut extensions = Self::none();
        for identifier in identifiers {
            match MarkdownExtension::from_identifier(identifier.as_ref()) {
                Some(ext) => extensions.enable(ext),
                None => warn!(
                    "Ignoring unsupported markdown extension: {}",
                    identifier.as_ref()
                ),
            }
        }
        extensions
    }

    /// The host's list when given, the default set otherwise
    pub fn from_config(identifiers: Option<&[String]>) -> Self {
        match identifiers {
            Some(ids) => Self::from_identifiers(ids),
            None => Self::default(),
        }
    }

    pub fn enable(&mut self, ext: MarkdownExtension) {
        if !self.contains(ext) {
            self.enabled.push(ext);
        }
    }

    pub fn contains(&self, ext: MarkdownExtension) -> bool {
        self.enabled.contains(&ext)
    }

    fn comrak_options(&self) -> ComrakOptions {
        let mut options = ComrakOptions::default();
        options.render.unsafe_ = true; // Slides may carry raw HTML
        options.extension.table = self.contains(MarkdownExtension::Tables);
        options.extension.footnotes = self.contains(MarkdownExtension::Footnotes);
        options.extension.strikethrough = self.contains(MarkdownExtension::Strikethrough);
        options.extension.tasklist = self.contains(MarkdownExtension::TaskList);
        options
    }
}

/// One slide after conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedSlide {
    pub html: String,
    pub title: String,
}

/// Convert slide markdown to HTML and pick its title
pub fn convert_slide(markdown: &str, extensions: &MarkdownExtensions) -> Result<ConvertedSlide> {
    let (front_title, body) = if extensions.contains(MarkdownExtension::Meta) {
        let (front_matter, body) = split_front_matter(markdown);
        let title = match front_matter {
            Some(yaml) => front_matter_title(yaml)?,
            None => None,
        };
        (title, body)
    } else {
        (None, markdown)
    };

    let mut html = markdown_to_html(body.trim(), &extensions.comrak_options());

    if extensions.contains(MarkdownExtension::AttrList) {
        html = apply_attr_lists(&html);
    }
    html = rewrite_code_blocks(
        &html,
        extensions.contains(MarkdownExtension::Highlight),
        extensions.contains(MarkdownExtension::SuperFences),
    );

    let title = front_title.unwrap_or_else(|| extract_title(body));
    Ok(ConvertedSlide { html, title })
}

/// Text of the first `# ` heading line, or "Untitled Slide"
pub fn extract_title(markdown: &str) -> String {
    TITLE_RE
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| UNTITLED_SLIDE.to_string())
}

/// Split a leading `---` delimited front matter block from the body
pub fn split_front_matter(markdown: &str) -> (Option<&str>, &str) {
    let text = markdown.trim_start_matches('\u{feff}');
    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, markdown);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let marker = line.trim_end();
        if marker == "---" || marker == "..." {
            let front = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(front), body);
        }
        offset += line.len();
    }

    (None, markdown)
}

fn front_matter_title(yaml: &str) -> Result<Option<String>> {
    if yaml.trim().is_empty() {
        return Ok(None);
    }
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(yaml)
        .map_err(|e| SlidesError::ConversionError(format!("Invalid front matter: {}", e)))?;

    Ok(value
        .get("title")
        .and_then(|title| title.as_str())
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty()))
}

/// Retarget diagram fences to `pre.mermaid` and wrap other code for highlighting.
/// Works on comrak's emitted markup, so class names here are what the client script expects.
fn rewrite_code_blocks(html: &str, highlight: bool, diagrams: bool) -> String {
    if !highlight && !diagrams {
        return html.to_string();
    }

    CODE_BLOCK_RE
        .replace_all(html, |caps: &Captures| {
            let language = caps.get(1).map(|m| m.as_str());
            let code = &caps[2];

            match language {
                Some(lang) if diagrams && DIAGRAM_LANGUAGES.contains(&lang) => {
                    format!(r#"<pre class="{}">{}</pre>"#, lang, code)
                }
                _ if highlight => format!(r#"<div class="highlight">{}</div>"#, &caps[0]),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn apply_attr_lists(html: &str) -> String {
    ATTR_LIST_RE
        .replace_all(html, |caps: &Captures| {
            let tag = &caps[1];
            if tag != &caps[4] {
                return caps[0].to_string();
            }
            match render_attributes(&caps[3]) {
                Some(attributes) => format!("<{tag}{attributes}>{}</{tag}>", &caps[2]),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Render `#id .class key=value` tokens as attributes; None if any token is not one of those
fn render_attributes(spec: &str) -> Option<String> {
    let mut id = None;
    let mut classes = Vec::new();
    let mut pairs = Vec::new();

    for token in spec.split_whitespace() {
        if let Some(value) = token.strip_prefix('#') {
            id = Some(value);
        } else if let Some(value) = token.strip_prefix('.') {
            classes.push(value);
        } else if let Some((key, value)) = token.split_once('=') {
            pairs.push((key, value.trim_matches('"').trim_matches('\'')));
        } else {
            return None;
        }
    }

    if id.is_none() && classes.is_empty() && pairs.is_empty() {
        return None;
    }

    let mut attributes = String::new();
    if let Some(id) = id {
        attributes.push_str(&format!(r#" id="{}""#, escape_html(id)));
    }
    if !classes.is_empty() {
        attributes.push_str(&format!(r#" class="{}""#, escape_html(&classes.join(" "))));
    }
    for (key, value) in pairs {
        attributes.push_str(&format!(r#" {}="{}""#, escape_html(key), escape_html(value)));
    }
    Some(attributes)
}
