// ABOUTME: Watch module for rebuilding pages when docs sources change
// ABOUTME: Debounces filesystem events under the docs root and reruns the site build

use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;

use crate::config::Config;
use crate::errors::{Result, SlidesError};
use crate::site;
use crate::utils;

/// Build once, then rebuild whenever a relevant file under the docs root changes.
/// Runs until the event channel closes.
pub fn watch_docs(config: &Config, out_dir: &Path) -> Result<()> {
    site::require_docs_dir(&config.docs_dir)?;

    // Initial build
    site::build_site(config, out_dir)?;

    let (tx, rx) = mpsc::channel();
    let debounce = Duration::from_millis(config.debounce_ms);
    let mut debouncer = new_debouncer(debounce, None, tx)
        .map_err(|e| SlidesError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = utils::get_absolute_path(&config.docs_dir)?;
    debouncer
        .watcher()
        .watch(&watch_path, RecursiveMode::Recursive)
        .map_err(|e| {
            SlidesError::WatchError(format!(
                "Failed to start watching directory {:?}: {}",
                watch_path, e
            ))
        })?;

    // Extra files outside the docs tree that also trigger a rebuild
    let extra_files: Vec<PathBuf> = [&config.template, &config.stylesheet, &config.script]
        .into_iter()
        .flatten()
        .filter_map(|path| utils::get_absolute_path(path).ok())
        .collect();
    for file in &extra_files {
        if !file.starts_with(&watch_path) {
            debouncer
                .watcher()
                .watch(file, RecursiveMode::NonRecursive)
                .map_err(|e| {
                    SlidesError::WatchError(format!("Failed to watch {:?}: {}", file, e))
                })?;
        }
    }

    let out_abs = utils::get_absolute_path(out_dir).ok();
    info!("Watching for changes in {:?}", watch_path);
    println!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        config.docs_dir
    );

    let mut last_processed = Instant::now();

    for result in rx {
        match result {
            Ok(events) => {
                let relevant_changes = events.iter().any(|event| {
                    event.paths.iter().any(|path| {
                        let relevant = is_relevant_path(path, &extra_files, out_abs.as_deref());
                        if relevant {
                            debug!("Detected relevant change in {:?}", path);
                        }
                        relevant
                    })
                });

                let now = Instant::now();
                if relevant_changes && now.duration_since(last_processed) > debounce {
                    match site::build_site(config, out_dir) {
                        Ok(summary) => {
                            info!("Rebuilt {} page(s)", summary.pages);
                            last_processed = now;
                        }
                        Err(e) => error!("Failed to rebuild pages: {}", e),
                    }
                }
            }
            Err(errors) => {
                for e in errors {
                    error!("Watch error: {:?}", e);
                }
            }
        }
    }

    Ok(())
}

/// Markdown sources and the configured template or asset overrides are
/// relevant; anything written into the output directory is not.
pub fn is_relevant_path(path: &Path, extra_files: &[PathBuf], out_dir: Option<&Path>) -> bool {
    if let Some(out_dir) = out_dir {
        if path.starts_with(out_dir) {
            return false;
        }
    }

    if extra_files.iter().any(|file| file == path) {
        return true;
    }

    match path.extension() {
        Some(ext) => ext.to_string_lossy().eq_ignore_ascii_case("md"),
        None => false,
    }
}
