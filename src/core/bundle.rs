//! Pagination of the message sequence.
//!
//! # Example
//!
//! ```rust
//! use chatpage::Message;
//! use chatpage::core::bundle::bundles;
//!
//! let messages: Vec<Message> = (0..5)
//!     .map(|i| Message::new("1/1/24, 10:00", "Alice", format!(" {i}")))
//!     .collect();
//!
//! let ranges: Vec<_> = bundles(&messages, 2).map(|b| (b.start, b.end())).collect();
//! assert_eq!(ranges, vec![(0, 2), (2, 4), (4, 5)]);
//! ```

use crate::Message;

/// A contiguous page of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bundle<'a> {
    /// Index of the first message (inclusive)
    pub start: usize,
    pub messages: &'a [Message],
}

impl Bundle<'_> {
    /// Index one past the last message.
    pub fn end(&self) -> usize {
        self.start + self.messages.len()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Splits `messages` into consecutive bundles of at most `step` messages.
///
/// A `step` of 0 puts everything into one bundle. Empty input yields no bundles.
pub fn bundles(messages: &[Message], step: usize) -> impl Iterator<Item = Bundle<'_>> {
    let size = if step == 0 { messages.len().max(1) } else { step };
    messages
        .chunks(size)
        .enumerate()
        .map(move |(i, chunk)| Bundle {
            start: i * size,
            messages: chunk,
        })
}
