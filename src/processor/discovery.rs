//! File discovery module for markdown documents
//!
//! Lists the markdown files directly inside a directory. Subdirectories are
//! not descended into.

use crate::error::{ConvertError, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File discovery component for batch conversion
#[derive(Debug)]
pub struct MarkdownDiscovery {
    input_dir: PathBuf,
    extension: String,
}

impl MarkdownDiscovery {
    /// Create a new discovery instance for `input_dir`
    pub fn new(input_dir: PathBuf, extension: &str) -> Self {
        Self {
            input_dir,
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Discover markdown files, sorted by path
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(ConvertError::SourceNotFound {
                path: self.input_dir.clone(),
            });
        }

        let pattern = format!(
            "{}/*.{}",
            Pattern::escape(&self.input_dir.to_string_lossy()),
            Pattern::escape(&self.extension)
        );
        debug!("Searching for markdown files with pattern: {}", pattern);

        let entries = glob::glob(&pattern).map_err(|e| {
            ConvertError::configuration(format!("Invalid discovery pattern '{}': {}", pattern, e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                ConvertError::io(path, std::io::Error::from(e))
            })?;
            if is_markdown_file(&path, &self.extension) {
                files.push(path);
            }
        }
        files.sort();

        debug!(
            "Found {} markdown files in {}",
            files.len(),
            self.input_dir.display()
        );
        Ok(files)
    }
}

/// Check if a path is a regular file with the given extension
fn is_markdown_file(path: &Path, extension: &str) -> bool {
    path.is_file() && path.extension().is_some_and(|ext| ext == extension)
}
