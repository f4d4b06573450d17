//! Low-level WhatsApp transcript segmentation.
//!
//! WhatsApp exports vary by locale and platform, but every message starts
//! with a date/time stamp:
//!
//! - US: `1/15/24, 10:30 - Sender: Message`
//! - ES: `15/1/24, 9:05 - Sender: Message`
//! - DE: `15.01.24, 10:30 - Sender: Message`
//! - FR: `15/01/2024, 10:30 - Sender: Message`
//! - macOS: `[15/01/2024, 10:30:45] Sender: Message`
//!
//! Messages are cut at timestamp boundaries rather than at line breaks, so
//! multiline bodies stay attached to their message.

use std::sync::LazyLock;

use regex::Regex;

/// Timestamp that opens every message.
///
/// Day and month take one or two digits, `/` or `.` as separator, two or
/// four digit year, hour with one or two digits, optional seconds (macOS).
pub const TIMESTAMP_PATTERN: &str =
    r"\b[0-9]{1,2}\b[/.][0-9]{1,2}[/.][0-9]{2,4}, [0-9]{1,2}:[0-9]{2}(?::[0-9]{2})?";

static TIMESTAMP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TIMESTAMP_PATTERN).expect("timestamp pattern is valid"));

/// The two export dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// Android / Windows: `12/5/23, 9:41 - Alice: Hello`
    Standard,
    /// macOS / iOS: `[12/5/23, 9:41:00] Alice: Hello`
    Mac,
}

impl Dialect {
    /// Separator between the date and the author.
    pub fn delimiter(self) -> &'static str {
        match self {
            Dialect::Standard => " - ",
            Dialect::Mac => "] ",
        }
    }
}

/// Detects the export dialect.
///
/// A transcript is macOS flavoured when an opening bracket appears before
/// the first colon (the one in the first timestamp).
pub fn detect_dialect(text: &str) -> Dialect {
    match (text.find('['), text.find(':')) {
        (Some(bracket), Some(colon)) if bracket < colon => Dialect::Mac,
        _ => Dialect::Standard,
    }
}

/// One timestamp-delimited span, split into its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEntry<'a> {
    /// Date/time label.
    pub date: &'a str,
    /// Sender, `None` for system notifications.
    pub author: Option<&'a str>,
    /// Body after the author's colon.
    pub body: &'a str,
}

/// Splits a transcript into raw entries, one per timestamp match.
///
/// Text before the first timestamp is ignored. A transcript without any
/// timestamp yields no entries.
pub fn split_entries(text: &str, dialect: Dialect) -> Vec<RawEntry<'_>> {
    let stamps: Vec<_> = TIMESTAMP.find_iter(text).collect();

    stamps
        .iter()
        .enumerate()
        .map(|(i, stamp)| {
            let end = stamps.get(i + 1).map_or(text.len(), |next| next.start());
            parse_span(&text[stamp.start()..end], stamp.len(), dialect)
        })
        .collect()
}

/// Counts timestamp boundaries without splitting.
pub fn count_entries(text: &str) -> usize {
    TIMESTAMP.find_iter(text).count()
}

fn parse_span(span: &str, stamp_len: usize, dialect: Dialect) -> RawEntry<'_> {
    let delimiter = dialect.delimiter();
    let (date, rest) = match span.find(delimiter) {
        Some(idx) => (&span[..idx], &span[idx + delimiter.len()..]),
        None => span.split_at(stamp_len),
    };

    let (author, body) = match rest.find(':') {
        Some(colon) if colon > 0 => (Some(&rest[..colon]), &rest[colon + 1..]),
        _ => (None, rest),
    };

    // macOS spans end with the `[` that opens the next timestamp
    let body = match dialect {
        Dialect::Mac => drop_last_char(body),
        Dialect::Standard => body,
    };

    RawEntry { date, author, body }
}

fn drop_last_char(s: &str) -> &str {
    s.char_indices().next_back().map_or(s, |(idx, _)| &s[..idx])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_dialect_standard() {
        assert_eq!(
            detect_dialect("12/5/23, 9:41 - Alice: Hello"),
            Dialect::Standard
        );
    }

    #[test]
    fn test_detect_dialect_mac() {
        assert_eq!(
            detect_dialect("[12/5/23, 9:41:00] Alice: Hello"),
            Dialect::Mac
        );
    }

    #[test]
    fn test_detect_dialect_bracket_after_colon() {
        assert_eq!(
            detect_dialect("12/5/23, 9:41 - Alice: [link]"),
            Dialect::Standard
        );
    }

    #[test]
    fn test_detect_dialect_without_colon() {
        assert_eq!(detect_dialect("[no colon here"), Dialect::Standard);
        assert_eq!(detect_dialect(""), Dialect::Standard);
    }

    #[test]
    fn test_split_standard() {
        let text = "12/5/23, 9:41 - Alice: Hello\n12/5/23, 9:42 - Bob: Hi\nthere";
        let entries = split_entries(text, Dialect::Standard);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "12/5/23, 9:41");
        assert_eq!(entries[0].author, Some("Alice"));
        assert_eq!(entries[0].body, " Hello\n");
        assert_eq!(entries[1].author, Some("Bob"));
        assert_eq!(entries[1].body, " Hi\nthere");
    }

    #[test]
    fn test_split_mac_trims_next_bracket() {
        let text = "[12/5/23, 9:41:00] Alice: Hello\n[12/5/23, 9:42:10] Bob: Hi\n";
        let entries = split_entries(text, Dialect::Mac);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "12/5/23, 9:41:00");
        assert_eq!(entries[0].body, " Hello\n");
        assert_eq!(entries[1].date, "12/5/23, 9:42:10");
        assert_eq!(entries[1].body, " Hi");
    }

    #[test]
    fn test_split_system_notification() {
        let text = "12/5/23, 9:41 - Alice created group \"Trip\"\n";
        let entries = split_entries(text, Dialect::Standard);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].author, None);
        assert_eq!(entries[0].body, "Alice created group \"Trip\"\n");
    }

    #[test]
    fn test_split_german_dots_and_four_digit_year() {
        let text = "26.10.2025, 20:40 - Anna: Hallo";
        let entries = split_entries(text, Dialect::Standard);
        assert_eq!(entries[0].date, "26.10.2025, 20:40");
        assert_eq!(entries[0].author, Some("Anna"));
    }

    #[test]
    fn test_split_without_delimiter_keeps_timestamp() {
        let text = "12/5/23, 9:41 Alice: odd line";
        let entries = split_entries(text, Dialect::Standard);
        assert_eq!(entries[0].date, "12/5/23, 9:41");
        assert_eq!(entries[0].author, Some(" Alice"));
        assert_eq!(entries[0].body, " odd line");
    }

    #[test]
    fn test_split_no_timestamps() {
        assert!(split_entries("just some text: nothing else", Dialect::Standard).is_empty());
        assert_eq!(count_entries("nothing"), 0);
    }

    #[test]
    fn test_leading_text_is_ignored() {
        let text = "garbage\n12/5/23, 9:41 - Alice: Hello";
        let entries = split_entries(text, Dialect::Standard);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].body, " Hello");
    }

    #[test]
    fn test_drop_last_char_multibyte() {
        assert_eq!(drop_last_char("hé"), "h");
        assert_eq!(drop_last_char("👋"), "");
        assert_eq!(drop_last_char(""), "");
    }
}
