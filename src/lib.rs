//! # Chatpage
//!
//! A Rust library for turning WhatsApp chat exports into paginated,
//! self-contained HTML documents.
//!
//! ## Overview
//!
//! A WhatsApp "Export chat" produces a `.txt` transcript plus the media files
//! it mentions. Chatpage:
//!
//! - splits the transcript into messages at timestamp boundaries (Android
//!   and macOS/iOS dialects);
//! - recognises polls and events written into message bodies, in English,
//!   Italian, Spanish, German and French exports;
//! - resolves attachments referenced by file name and embeds them inline,
//!   through a per-document JSON map, or as relative links;
//! - pages the conversation into documents of a fixed number of messages.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatpage::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let files = vec![
//!         InputFile::from_bytes(
//!             "WhatsApp Chat with Alice.txt",
//!             b"12/5/23, 9:41 - Alice: IMG-1.jpg (file attached)\n12/5/23, 9:42 - Bob: Nice\n".to_vec(),
//!         ),
//!         InputFile::from_bytes("IMG-1.jpg", vec![0xFF, 0xD8, 0xFF]),
//!     ];
//!
//!     let config = ConvertConfig::new().with_display_name("Bob");
//!     let assets = Assets::default();
//!     let mut sink = MemorySink::new();
//!
//!     let stats = Converter::new(&config, &assets).convert(&files, &mut sink)?;
//!     assert_eq!(stats.documents, 1);
//!     assert_eq!(sink.documents()[0].name, "[0-2] Alice.html");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`translation`] - localised marker phrases ([`Language`](translation::Language), [`TranslationTable`](translation::TranslationTable))
//! - [`parsing`] - low-level timestamp segmentation and dialect detection
//! - [`parser`] - [`WhatsAppParser`](parser::WhatsAppParser), transcript → [`Message`]s
//! - [`content`] - poll and event detection
//! - [`attachments`] - file-name matching, mime types, data URLs
//! - [`render`] - HTML tree and [`DocumentRenderer`](render::DocumentRenderer)
//! - [`core`] - pagination, sinks and the [`Converter`](core::Converter) pipeline
//! - [`inputs`] - [`InputFile`](inputs::InputFile) and input collection from paths, folders and zips
//! - [`config`] - [`ConvertConfig`](config::ConvertConfig) and bundled [`Assets`](config::Assets)
//! - [`cli`] - CLI types (requires `cli` feature)
//! - [`error`] - unified error types ([`ChatpageError`], [`Result`])
//! - [`prelude`] - convenient re-exports

pub mod attachments;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod content;
pub mod core;
pub mod error;
pub mod inputs;
pub mod message;
pub mod parser;
pub mod parsing;
pub mod render;
pub mod translation;

// Re-export the main types at the crate root for convenience
pub use error::{ChatpageError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatpage::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{ChatpageError, Result};

    // Settings
    pub use crate::config::{Assets, ConvertConfig, EncodingMode};
    pub use crate::translation::{Language, TranslationTable};

    // Inputs and parsing
    pub use crate::inputs::{InputFile, collect_inputs};
    pub use crate::parser::WhatsAppParser;

    // Structured content
    pub use crate::content::{EventInfo, PollInfo, SpecialContent, classify};

    // Pipeline and output
    pub use crate::core::{ConversionStats, Converter, DirectorySink, DocumentSink, MemorySink, bundles};
    #[cfg(feature = "archive")]
    pub use crate::core::ZipSink;
    pub use crate::render::{Document, DocumentRenderer};
}
