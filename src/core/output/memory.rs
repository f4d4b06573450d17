//! In-memory output for library callers.

use std::path::PathBuf;

use super::DocumentSink;
use crate::error::Result;
use crate::render::Document;

/// Collects documents in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    documents: Vec<Document>,
    base_name: Option<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    /// Returns the base name passed to `finish`, if the run completed.
    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }
}

impl DocumentSink for MemorySink {
    fn accept(&mut self, document: &Document) -> Result<()> {
        self.documents.push(document.clone());
        Ok(())
    }

    fn finish(&mut self, base_name: &str) -> Result<Vec<PathBuf>> {
        self.base_name = Some(base_name.to_string());
        Ok(Vec::new())
    }
}
