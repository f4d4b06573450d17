//! Unified error types for chatpage.
//!
//! This module provides a single [`ChatpageError`] enum that covers every
//! fallible operation of the library.
//!
//! Note that parsing itself never fails: a transcript without timestamps
//! yields no messages, an unreadable attachment becomes an empty payload.
//! Errors come from the edges, i.e. reading inputs, loading settings and
//! writing documents.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatpage operations.
///
/// # Example
///
/// ```rust
/// use chatpage::error::Result;
/// use chatpage::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatpageError>;

/// The error type for all chatpage operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatpageError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - An input file cannot be read
    /// - The output directory cannot be created
    /// - Disk is full (when writing documents)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON parsing/serialization error.
    ///
    /// Raised by settings files and by the sideband attachment map.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip archive error, when reading a zipped export or writing the output archive.
    #[cfg(feature = "archive")]
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A configuration value is invalid.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending setting
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// An input path does not exist.
    #[error("Input not found: {}", path.display())]
    InputNotFound {
        /// The missing path
        path: PathBuf,
    },

    /// None of the inputs is a `.txt` transcript.
    #[error("No transcript found among the inputs (expected a .txt export)")]
    NoTranscript,

    /// A bundle could not be rendered or handed to its sink.
    #[error("Failed to produce document {bundle}: {message}")]
    Render {
        /// Name of the document being produced
        bundle: String,
        /// Description of the failure
        message: String,
    },
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatpageError {
    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatpageError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an input-not-found error.
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        ChatpageError::InputNotFound { path: path.into() }
    }

    /// Creates a render error.
    pub fn render(bundle: impl Into<String>, message: impl Into<String>) -> Self {
        ChatpageError::Render {
            bundle: bundle.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatpageError::Io(_))
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, ChatpageError::InvalidConfig { .. })
    }

    /// Returns `true` if this is a render error.
    pub fn is_render(&self) -> bool {
        matches!(self, ChatpageError::Render { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err = ChatpageError::from(io_err);
        let display = err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
        assert!(err.is_io());
    }

    #[test]
    fn test_json_error_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = ChatpageError::from(json_err);
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_invalid_config_display() {
        let err = ChatpageError::invalid_config("theme", "empty property name");
        let display = err.to_string();
        assert!(display.contains("theme"));
        assert!(display.contains("empty property name"));
        assert!(err.is_invalid_config());
    }

    #[test]
    fn test_input_not_found_display() {
        let err = ChatpageError::input_not_found("/nope/chat.txt");
        assert!(err.to_string().contains("/nope/chat.txt"));
    }

    #[test]
    fn test_render_display() {
        let err = ChatpageError::render("[0-10] Alice.html", "disk full");
        assert!(err.to_string().contains("[0-10] Alice.html"));
        assert!(err.is_render());
        assert!(!err.is_io());
    }

    #[test]
    fn test_no_transcript_display() {
        assert!(ChatpageError::NoTranscript.to_string().contains(".txt"));
    }
}
