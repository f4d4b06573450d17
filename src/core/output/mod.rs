//! Document sinks.
//!
//! Rendering produces [`Document`]s; a [`DocumentSink`] decides where they go:
//! - [`DirectorySink`] - one `.html` file per document in a folder
//! - [`ZipSink`] - every document in one `<name>.zip` (requires `archive` feature)
//! - [`MemorySink`] - kept in memory
//!
//! # Example
//!
//! ```rust
//! use chatpage::core::output::{DocumentSink, MemorySink};
//! use chatpage::render::Document;
//!
//! let mut sink = MemorySink::new();
//! sink.accept(&Document { name: "[0-1] Alice.html".into(), bytes: vec![] })?;
//! sink.finish("Alice")?;
//! assert_eq!(sink.documents().len(), 1);
//! # Ok::<(), chatpage::ChatpageError>(())
//! ```

use std::path::PathBuf;

use crate::error::Result;
use crate::render::Document;

mod directory;
mod memory;
#[cfg(feature = "archive")]
mod zip_writer;

pub use directory::DirectorySink;
pub use memory::MemorySink;
#[cfg(feature = "archive")]
pub use zip_writer::ZipSink;

/// Destination for rendered documents.
pub trait DocumentSink {
    /// Takes one document. Called once per bundle, in order.
    fn accept(&mut self, document: &Document) -> Result<()>;

    /// Completes the run and returns the paths written, if any.
    fn finish(&mut self, base_name: &str) -> Result<Vec<PathBuf>>;
}
