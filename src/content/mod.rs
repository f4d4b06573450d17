//! Structured content embedded in message bodies.
//!
//! WhatsApp exports polls and events as plain text with fixed, localised
//! markers:
//!
//! ```text
//!  POLL:
//! Where do we eat?
//! OPTION: Pizza (3 votes)
//! OPTION: Sushi (1 vote)
//! ```
//!
//! ```text
//!  EVENT: Birthday party
//! Event Start time: 1700000000000
//! Event Description: Bring cake
//! Event Cancelled: false
//! ```
//!
//! [`classify`] recognises these shapes and extracts a [`PollInfo`] or an
//! [`EventInfo`]; everything else is [`SpecialContent::Plain`].
//!
//! # Example
//!
//! ```rust
//! use chatpage::content::{SpecialContent, classify};
//! use chatpage::translation::{Language, TranslationTable};
//!
//! let body = " POLL:\nColor?\nOPTION: Red (3 votes)\nOPTION: Blue (1 vote)";
//! let SpecialContent::Poll(poll) = classify(body, Language::En, TranslationTable::builtin()) else {
//!     panic!("not a poll");
//! };
//! assert_eq!(poll.title, "Color?");
//! assert_eq!(poll.options[0].vote_percentage, 75.0);
//! ```

mod event;
mod poll;

pub use event::{EventInfo, is_event, parse_event};
pub use poll::{PollInfo, PollOption, is_poll, parse_poll};

use crate::translation::{Language, TranslationTable};

/// Kind of a message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Plain,
    Poll,
    Event,
}

/// A classified message body.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecialContent {
    /// Regular text, possibly referencing attachments
    Plain,
    /// A poll with its options and vote shares
    Poll(PollInfo),
    /// A calendar event
    Event(EventInfo),
}

impl SpecialContent {
    /// Returns the kind without the payload.
    pub fn kind(&self) -> ContentKind {
        match self {
            SpecialContent::Plain => ContentKind::Plain,
            SpecialContent::Poll(_) => ContentKind::Poll,
            SpecialContent::Event(_) => ContentKind::Event,
        }
    }
}

/// Classifies a cleaned message body (see [`crate::message::clean_text`]).
///
/// Polls are checked before events.
pub fn classify(body: &str, language: Language, table: &TranslationTable) -> SpecialContent {
    if is_poll(body, language, table) {
        SpecialContent::Poll(parse_poll(body, language, table))
    } else if is_event(body, language, table) {
        SpecialContent::Event(parse_event(body, language, table))
    } else {
        SpecialContent::Plain
    }
}

/// Text after the last occurrence of `marker`.
pub(crate) fn after_last<'a>(body: &'a str, marker: &str) -> Option<&'a str> {
    body.rfind(marker).map(|idx| &body[idx + marker.len()..])
}

/// Text up to (excluding) the first newline.
pub(crate) fn first_line(text: &str) -> &str {
    text.split_once('\n').map_or(text, |(line, _)| line)
}
