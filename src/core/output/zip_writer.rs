//! Zip output: all documents in one `<name>.zip` archive.

use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::PathBuf;

use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::DocumentSink;
use crate::error::Result;
use crate::render::Document;

/// Accumulates documents into an archive written on [`DocumentSink::finish`].
///
/// The archive is named after the run's base name, which is only known once
/// every document was produced.
pub struct ZipSink {
    dir: PathBuf,
    writer: ZipWriter<Cursor<Vec<u8>>>,
    entries: usize,
}

impl ZipSink {
    /// Creates a sink writing its archive into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            writer: ZipWriter::new(Cursor::new(Vec::new())),
            entries: 0,
        }
    }

    /// Returns the number of documents added so far.
    pub fn entries(&self) -> usize {
        self.entries
    }
}

impl DocumentSink for ZipSink {
    fn accept(&mut self, document: &Document) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        self.writer.start_file(document.name.as_str(), options)?;
        self.writer.write_all(&document.bytes)?;
        self.entries += 1;
        Ok(())
    }

    fn finish(&mut self, base_name: &str) -> Result<Vec<PathBuf>> {
        let buffer = self.writer.finish()?.into_inner();
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{base_name}.zip"));
        File::create(&path)?.write_all(&buffer)?;
        debug!(path = %path.display(), entries = self.entries, "wrote archive");
        Ok(vec![path])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::tempdir;

    #[test]
    fn test_archive_contains_documents() {
        let dir = tempdir().unwrap();
        let mut sink = ZipSink::new(dir.path());
        for name in ["[0-2] Alice.html", "[2-3] Alice.html"] {
            sink.accept(&Document {
                name: name.to_string(),
                bytes: name.as_bytes().to_vec(),
            })
            .unwrap();
        }
        let written = sink.finish("Alice").unwrap();
        assert_eq!(written, vec![dir.path().join("Alice.zip")]);

        let mut archive = zip::ZipArchive::new(File::open(&written[0]).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("[2-3] Alice.html")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "[2-3] Alice.html");
    }
}
