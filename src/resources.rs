// ABOUTME: Static asset handling for the doc-slides plugin
// ABOUTME: Installs the deck stylesheet and script into the site and builds the head tags

use crate::config::Config;
use crate::errors::{Result, SlidesError};
use crate::output;
use crate::page::Page;
use crate::utils;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const BUNDLED_CSS: &str = include_str!("../static/css/slides.css");
const BUNDLED_JS: &str = include_str!("../static/js/slides.js");

/// Site-relative location of the stylesheet
pub const STYLESHEET_PATH: &str = "assets/slides/css/slides.css";
/// Site-relative location of the script
pub const SCRIPT_PATH: &str = "assets/slides/js/slides.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Css,
    Js,
}

/// A deck asset: the bundled copy unless a local override is configured
#[derive(Debug, Clone)]
pub struct Asset {
    pub kind: AssetKind,
    pub override_path: Option<PathBuf>,
}

impl Asset {
    pub fn new(kind: AssetKind, override_path: Option<PathBuf>) -> Self {
        Self {
            kind,
            override_path,
        }
    }

    /// Where the asset is published, relative to the site root
    pub fn site_path(&self) -> &'static str {
        match self.kind {
            AssetKind::Css => STYLESHEET_PATH,
            AssetKind::Js => SCRIPT_PATH,
        }
    }

    pub fn content(&self) -> Result<String> {
        match &self.override_path {
            Some(path) => {
                info!("Reading local asset: {:?}", path);
                if !path.is_file() {
                    return Err(SlidesError::PathNotFoundError(path.clone()));
                }
                Ok(fs::read_to_string(path)?)
            }
            None => Ok(match self.kind {
                AssetKind::Css => BUNDLED_CSS.to_string(),
                AssetKind::Js => BUNDLED_JS.to_string(),
            }),
        }
    }

    /// The `<link>` or `<script>` tag referencing this asset from `page`
    pub fn tag(&self, page: &Page) -> String {
        let href = utils::relative_url(&page.url, self.site_path());
        match self.kind {
            AssetKind::Css => format!(r#"<link rel="stylesheet" href="{}">"#, href),
            AssetKind::Js => format!(r#"<script src="{}" defer></script>"#, href),
        }
    }

    /// Copy the asset to its place under `site_dir`
    pub fn install(&self, site_dir: &Path) -> Result<PathBuf> {
        let target = site_dir.join(self.site_path());
        output::write_file(&self.content()?, &target)?;
        Ok(target)
    }
}

/// The stylesheet and script, honouring overrides from the config
pub fn deck_assets(config: &Config) -> [Asset; 2] {
    [
        Asset::new(AssetKind::Css, config.stylesheet.clone()),
        Asset::new(AssetKind::Js, config.script.clone()),
    ]
}

/// Write both assets into the site directory
pub fn install_assets(config: &Config) -> Result<Vec<PathBuf>> {
    let installed = deck_assets(config)
        .iter()
        .map(|asset| asset.install(&config.site_dir))
        .collect::<Result<Vec<_>>>()?;
    info!("Installed slide assets into {:?}", config.site_dir);
    Ok(installed)
}

/// Head tags for a page containing at least one deck
pub fn head_tags(config: &Config, page: &Page) -> Vec<String> {
    deck_assets(config).iter().map(|asset| asset.tag(page)).collect()
}
