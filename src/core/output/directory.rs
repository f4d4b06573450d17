//! Folder output: one `.html` file per document.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::DocumentSink;
use crate::error::Result;
use crate::render::Document;

/// Writes each document into a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Returns the output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink for DirectorySink {
    fn accept(&mut self, document: &Document) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(&document.name);
        fs::write(&path, &document.bytes)?;
        debug!(path = %path.display(), size = document.len(), "wrote document");
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self, _base_name: &str) -> Result<Vec<PathBuf>> {
        Ok(self.written.clone())
    }
}
