//! Message records extracted from a transcript.
//!
//! A [`Message`] is one timestamp-delimited entry of a WhatsApp export:
//! the raw date label, the author, and the body exactly as it appeared in
//! the file (leading space and embedded newlines included).
//!
//! # Example
//!
//! ```
//! use chatpage::Message;
//!
//! let msg = Message::new("12/5/23, 9:41", "Alice", " Hello");
//! assert_eq!(msg.author(), "Alice");
//! assert!(!msg.is_main_user());
//!
//! let mine = Message::new("12/5/23, 9:42", "Bob", " Hi").with_main_user(true);
//! assert!(mine.is_main_user());
//! ```

use serde::{Deserialize, Serialize};

/// One message of a WhatsApp transcript.
///
/// Messages are immutable once the segmenter produced them and keep the
/// order in which they appear in the transcript.
///
/// | Field | Description |
/// |-------|-------------|
/// | `date` | Date/time label as written in the export, e.g. `12/5/23, 9:41` |
/// | `author` | Sender name, or the translated notification label |
/// | `text` | Message body, unmodified |
/// | `is_main_user` | Whether the author is the configured display name |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Date/time label as written in the export.
    pub date: String,

    /// Sender of the message.
    ///
    /// System notifications carry the translated "WhatsApp Notification" label.
    pub author: String,

    /// Body of the message.
    pub text: String,

    /// `true` if the (trimmed) author equals the configured display name.
    #[serde(default)]
    pub is_main_user: bool,
}

impl Message {
    /// Creates a message that does not belong to the main user.
    pub fn new(date: impl Into<String>, author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            author: author.into(),
            text: text.into(),
            is_main_user: false,
        }
    }

    /// Sets whether the message was sent by the main user.
    #[must_use]
    pub fn with_main_user(mut self, is_main_user: bool) -> Self {
        self.is_main_user = is_main_user;
        self
    }

    /// Returns the date label.
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns the author.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the body.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if the message was sent by the main user.
    pub fn is_main_user(&self) -> bool {
        self.is_main_user
    }

    /// Returns the body with the invisible characters WhatsApp sprinkles
    /// into exports removed.
    ///
    /// Left-to-right and right-to-left marks are dropped, carriage returns
    /// are removed and no-break spaces (German and French exports) become
    /// plain spaces. Marker detection always runs on this form.
    pub fn clean_text(&self) -> String {
        clean_text(&self.text)
    }
}

/// Strips direction marks and carriage returns, and normalises no-break spaces.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\u{200E}' | '\u{200F}' | '\r'))
        .map(|c| if c == '\u{00A0}' { ' ' } else { c })
        .collect()
}
