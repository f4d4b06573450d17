//! WhatsApp transcript parser.
//!
//! Turns the text of one or more `.txt` exports into an ordered list of
//! [`Message`]s. Parsing never fails on content: a file without timestamps
//! simply contributes no messages.
//!
//! # Example
//!
//! ```rust
//! use chatpage::config::ConvertConfig;
//! use chatpage::parser::WhatsAppParser;
//!
//! let config = ConvertConfig::new().with_display_name("Bob");
//! let parser = WhatsAppParser::new(&config);
//!
//! let messages = parser.parse_str("12/5/23, 9:41 - Alice: Hello\n12/5/23, 9:42 - Bob: Hi");
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[0].text, " Hello\n");
//! assert!(messages[1].is_main_user);
//! ```

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::Message;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::inputs::InputFile;
use crate::parsing::whatsapp::{RawEntry, detect_dialect, split_entries};
use crate::translation::{Phrase, TranslationTable};

/// Parser for WhatsApp TXT exports.
///
/// Borrows the conversion settings for the main user name and the export
/// language (used to label system notifications).
pub struct WhatsAppParser<'a> {
    config: &'a ConvertConfig,
    table: &'a TranslationTable,
}

impl<'a> WhatsAppParser<'a> {
    /// Creates a parser using the built-in translation table.
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self {
            config,
            table: TranslationTable::builtin(),
        }
    }

    /// Replaces the translation table.
    #[must_use]
    pub fn with_table(mut self, table: &'a TranslationTable) -> Self {
        self.table = table;
        self
    }

    /// Returns the name of the parser.
    pub fn name(&self) -> &'static str {
        "WhatsApp"
    }

    /// Parses transcript text.
    pub fn parse_str(&self, content: &str) -> Vec<Message> {
        let dialect = detect_dialect(content);
        let messages: Vec<Message> = split_entries(content, dialect)
            .into_iter()
            .map(|entry| self.to_message(entry))
            .collect();

        debug!(?dialect, count = messages.len(), "segmented transcript");
        messages
    }

    /// Reads and parses a transcript file.
    ///
    /// Invalid UTF-8 sequences are replaced rather than rejected.
    pub fn parse(&self, path: &Path) -> Result<Vec<Message>> {
        let bytes = fs::read(path)?;
        Ok(self.parse_str(&String::from_utf8_lossy(&bytes)))
    }

    /// Parses every transcript among `files`, in the order given.
    ///
    /// Files from different transcripts are concatenated, not interleaved by
    /// time. Non-transcript files (media, documents) are skipped.
    pub fn parse_inputs(&self, files: &[InputFile]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();

        for file in files.iter().filter(|f| f.is_transcript()) {
            let bytes = file.read()?;
            let parsed = self.parse_str(&String::from_utf8_lossy(&bytes));
            if parsed.is_empty() {
                warn!(file = file.name(), "no timestamped messages found in transcript");
            }
            messages.extend(parsed);
        }

        Ok(messages)
    }

    fn to_message(&self, entry: RawEntry<'_>) -> Message {
        let is_main_user = entry
            .author
            .is_some_and(|author| author.trim() == self.config.display_name);
        let author = entry.author.unwrap_or_else(|| {
            self.table
                .get(Phrase::Notification, self.config.language)
        });

        Message::new(entry.date, author, entry.body).with_main_user(is_main_user)
    }
}
