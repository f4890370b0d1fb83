// ABOUTME: Output queue for standalone slide documents
// ABOUTME: Holds rendered files until the host flushes them to disk after a page

use crate::errors::Result;
use crate::utils;
use log::{debug, info};
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};

/// A rendered file waiting to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub path: PathBuf,
    pub content: String,
}

/// Files queued during a page transform. Interior locking lets one
/// resolver be shared by hosts that build pages on several threads.
#[derive(Debug, Default)]
pub struct PendingQueue {
    files: Mutex<Vec<PendingFile>>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a file. A later entry for the same path replaces the earlier one.
    pub fn push(&self, path: PathBuf, content: String) {
        let mut files = self.files.lock();
        files.retain(|f| f.path != path);
        files.push(PendingFile { path, content });
    }

    pub fn len(&self) -> usize {
        self.files.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.lock().is_empty()
    }

    /// Paths currently queued, in queue order
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().iter().map(|f| f.path.clone()).collect()
    }

    /// Write every queued file and clear the queue. Returns the number written.
    /// The queue is emptied before writing, so a failed write is not retried.
    pub fn flush(&self) -> Result<usize> {
        let files = std::mem::take(&mut *self.files.lock());
        if files.is_empty() {
            debug!("No pending slide files to write");
            return Ok(0);
        }

        for file in &files {
            write_file(&file.content, &file.path)?;
        }

        info!("Wrote {} slide file(s)", files.len());
        Ok(files.len())
    }
}

/// Write content to a file, creating parent directories
pub fn write_file(content: &str, output_path: &Path) -> Result<()> {
    debug!("Writing file: {:?}", output_path);
    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, content)?;
    Ok(())
}
