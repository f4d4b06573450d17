//! Input files: the transcript plus everything exported next to it.
//!
//! An [`InputFile`] is a named blob. Its name is what message bodies refer
//! to (`IMG-20240101-WA0001.jpg (file attached)`), so inputs are always named
//! by their bare file name, or by their entry path inside a zip archive.
//!
//! Path-backed inputs are read lazily: a photo is only loaded when some
//! message actually references it.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ChatpageError, Result};

/// Where the bytes of an input live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Already in memory (zip entries, tests, library callers)
    Memory(Vec<u8>),
    /// On disk, read on demand
    Path(PathBuf),
}

/// A named input blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    name: String,
    source: FileSource,
}

impl InputFile {
    /// Creates an in-memory input.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Creates a path-backed input, named by the path's file name.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            source: FileSource::Path(path),
        }
    }

    /// Returns the name messages refer to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns where the bytes come from.
    pub fn source(&self) -> &FileSource {
        &self.source
    }

    /// Returns `true` for WhatsApp transcripts (`*.txt`).
    pub fn is_transcript(&self) -> bool {
        self.name.ends_with("txt")
    }

    /// Returns the lowercased extension, or the whole lowercased name if
    /// there is no dot.
    pub fn extension(&self) -> String {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, ext)| ext)
            .to_lowercase()
    }

    /// Reads the content.
    pub fn read(&self) -> io::Result<Cow<'_, [u8]>> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
            FileSource::Path(path) => fs::read(path).map(Cow::Owned),
        }
    }
}

/// Collects inputs from command-line paths.
///
/// - a regular file becomes one input;
/// - a directory contributes every file below it;
/// - a `.zip` archive contributes each file entry (with the `archive` feature).
///
/// Order follows the arguments, then directory walk order (sorted by name).
pub fn collect_inputs<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<InputFile>> {
    let mut files = Vec::new();

    for path in paths {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChatpageError::input_not_found(path));
        }

        if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(|e| {
                    ChatpageError::Io(e.into_io_error().unwrap_or_else(|| {
                        io::Error::other("filesystem loop while walking input directory")
                    }))
                })?;
                if entry.file_type().is_file() {
                    files.push(InputFile::from_path(entry.into_path()));
                }
            }
        } else if is_zip(path) {
            files.extend(read_zip(path)?);
        } else {
            files.push(InputFile::from_path(path));
        }
    }

    debug!(count = files.len(), "collected input files");
    Ok(files)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
}

#[cfg(feature = "archive")]
fn read_zip(path: &Path) -> Result<Vec<InputFile>> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(fs::File::open(path)?)?;
    let mut files = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let mut bytes = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or_default());
        entry.read_to_end(&mut bytes)?;
        files.push(InputFile::from_bytes(entry.name(), bytes));
    }

    Ok(files)
}

// Without archive support a zip is just another attachment
#[cfg(not(feature = "archive"))]
fn read_zip(path: &Path) -> Result<Vec<InputFile>> {
    Ok(vec![InputFile::from_path(path)])
}
