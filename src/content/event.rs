//! Event extraction.

use serde::Serialize;

use super::{after_last, first_line};
use crate::translation::{Language, Phrase, TranslationTable};

/// A calendar event found in a message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventInfo {
    /// Text between the event marker and the start time line
    pub title: String,
    /// Milliseconds since the Unix epoch, `None` when unparsable
    pub start_time_millis: Option<i64>,
    /// Whether the export marks the event as cancelled
    pub cancelled: bool,
    /// Free-text description, `None` when absent or blank
    pub description: Option<String>,
    /// Call or meeting link
    pub join_link: Option<String>,
    /// Human-readable place name
    pub location_name: Option<String>,
    /// Coordinates as exported, e.g. `45.46,9.19`
    pub location_point: Option<String>,
}

/// Returns `true` if `body` starts with the event marker and carries a start time.
///
/// A cancelled event is still an event.
pub fn is_event(body: &str, language: Language, table: &TranslationTable) -> bool {
    body.starts_with(table.get(Phrase::Event, language))
        && body.contains(table.get(Phrase::EventStartTime, language))
}

/// Extracts the event fields.
///
/// Field values run from their marker to the end of that line; when a marker
/// appears more than once the last occurrence wins.
pub fn parse_event(body: &str, language: Language, table: &TranslationTable) -> EventInfo {
    let marker = |phrase: Phrase| table.get(phrase, language);
    let field = |phrase: Phrase| after_last(body, marker(phrase)).map(first_line);

    let rest = body.strip_prefix(marker(Phrase::Event)).unwrap_or(body);
    let title_end = rest
        .rfind(marker(Phrase::EventStartTimeField))
        .or_else(|| rest.rfind(marker(Phrase::EventStartTime)))
        .unwrap_or(rest.len());

    let start_time_millis = field(Phrase::EventStartTimeField)
        .and_then(|value| value.trim().parse::<i64>().ok());

    let cancelled = body
        .split_once(marker(Phrase::EventCancelled))
        .is_some_and(|(_, value)| value.trim_start().starts_with("true"));

    let description = field(Phrase::EventDescription)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string);

    EventInfo {
        title: rest[..title_end].to_string(),
        start_time_millis,
        cancelled,
        description,
        join_link: field(Phrase::EventJoinLink).map(str::to_string),
        location_name: field(Phrase::EventLocationName).map(str::to_string),
        location_point: field(Phrase::EventLocationPoint).map(str::to_string),
    }
}
